//! `crudkit init`: write a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default crudkit configuration file.
///
/// Writes the user config, or `./.crudkit.toml` with `--local`.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        AppConfig::local_path(Path::new("."))
    } else {
        AppConfig::config_path()
    };

    output.info("Initialising configuration...")?;
    match write_default(&config_path, args.force)? {
        Some(path) => output.success(&format!("Configuration created at {}", path.display()))?,
        None => output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?,
    }
    Ok(())
}

/// Write the default config to `path`; `None` if it exists and `force` is off.
fn write_default(path: &Path, force: bool) -> CliResult<Option<PathBuf>> {
    if path.exists() && !force {
        return Ok(None);
    }

    let toml =
        toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise default config: {e}"),
            source: Some(Box::new(e)),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".crudkit.toml");

        assert_eq!(write_default(&path, false).unwrap(), Some(path.clone()));
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.project, AppConfig::default().project);
    }

    #[test]
    fn existing_file_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".crudkit.toml");
        std::fs::write(&path, "[relations]\nstrict = true\n").unwrap();

        assert_eq!(write_default(&path, false).unwrap(), None);
        assert!(std::fs::read_to_string(&path).unwrap().contains("strict = true"));

        assert!(write_default(&path, true).unwrap().is_some());
        assert!(std::fs::read_to_string(&path).unwrap().contains("strict = false"));
    }
}
