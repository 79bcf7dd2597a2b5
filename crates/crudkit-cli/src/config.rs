//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CRUDKIT_<SECTION>__<KEY>`, e.g.
//!    `CRUDKIT_RELATIONS__STRICT=true`
//! 3. `./.crudkit.toml` in the working directory
//! 4. The user config file ([`AppConfig::config_path`])
//! 5. Built-in defaults (always present)
//!
//! `--config <FILE>` replaces 3 and 4 with that single, required file.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{BackendKind, OutputFormat};

/// File name of the per-project config.
pub const LOCAL_CONFIG_FILE: &str = ".crudkit.toml";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "CRUDKIT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How artifacts are placed in the project.
    pub project: ProjectConfig,
    /// Where stubs come from.
    pub stubs: StubsConfig,
    /// Relation spec parsing.
    pub relations: RelationsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub backend: BackendKind,
    /// PHP executable used by the artisan backend.
    pub php: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Conventional,
            php: "php".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Stub directory used when `--stubs` is not given.
    pub dir: Option<PathBuf>,
    /// Fill stubs missing from the directory with the built-in ones.
    pub fallback: bool,
}

impl Default for StubsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            fallback: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationsConfig {
    /// Reject unknown relation kinds instead of skipping them.
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from files and the environment over the defaults.
    ///
    /// `config_file` is the path given via `--config`. When set, it must
    /// exist and is the only file read.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let files: Vec<(PathBuf, bool)> = match config_file {
            Some(path) => vec![(path.clone(), true)],
            None => vec![
                (Self::config_path(), false),
                (PathBuf::from(LOCAL_CONFIG_FILE), false),
            ],
        };
        Self::load_from(&files, Environment::with_prefix(ENV_PREFIX))
    }

    /// Layer `files` (path, required) in order, then `env`, over defaults.
    fn load_from(files: &[(PathBuf, bool)], env: Environment) -> anyhow::Result<Self> {
        let defaults = toml::to_string(&Self::default())?;
        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));

        for (path, required) in files {
            debug!(path = %path.display(), required, "config source");
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        let config = builder
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.crudkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "crudkit", "crudkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Path of the per-project config inside `dir`.
    pub fn local_path(dir: &Path) -> PathBuf {
        dir.join(LOCAL_CONFIG_FILE)
    }
}
