//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crudkit",
    bin_name = "crudkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} CRUD scaffolding for Laravel projects",
    long_about = "crudkit generates a model, migration, controller and form \
                  requests for an entity from a compact field and relation spec.",
    after_help = "EXAMPLES:\n\
        \x20 crudkit make Post --fields \"title:string,body:text\"\n\
        \x20 crudkit make Post --fields \"title:string\" --relations \"belongsTo:User:user_id:id\"\n\
        \x20 crudkit stubs publish\n\
        \x20 crudkit completions bash > /usr/share/bash-completion/completions/crudkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the CRUD slice for an entity.
    #[command(
        visible_alias = "m",
        about = "Generate model, migration, controller and requests",
        after_help = "EXAMPLES:\n\
            \x20 crudkit make Post --fields \"title:string,body:text\"\n\
            \x20 crudkit make Post -f \"title:string\" -r \"belongsToMany:Tag:tag_id:post_id\"\n\
            \x20 crudkit make Post -f \"title:string\" --dry-run --output-format json"
    )]
    Make(MakeArgs),

    /// Inspect or export the stubs artifacts are rendered from.
    #[command(about = "Manage stubs", subcommand)]
    Stubs(StubsCommands),

    /// Initialise a crudkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 crudkit init           # user config location\n\
            \x20 crudkit init --local   # .crudkit.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crudkit completions bash > ~/.local/share/bash-completion/completions/crudkit\n\
            \x20 crudkit completions zsh  > ~/.zfunc/_crudkit\n\
            \x20 crudkit completions fish > ~/.config/fish/completions/crudkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the crudkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 crudkit config get relations.strict\n\
            \x20 crudkit config list"
    )]
    Config(ConfigCommands),
}

// ── make ──────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit make`.
#[derive(Debug, Args)]
pub struct MakeArgs {
    /// Entity (model) name, e.g. `Post`.
    #[arg(value_name = "NAME", help = "Entity name, e.g. Post")]
    pub name: String,

    /// Comma-separated `name:type` pairs.
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "SPEC",
        help = "Fields as name:type pairs, comma separated"
    )]
    pub fields: String,

    /// Comma-separated `kind:Related:foreign_key:local_key` tuples.
    #[arg(
        short = 'r',
        long = "relations",
        value_name = "SPEC",
        help = "Relations as kind:Related:foreign_key:local_key, comma separated"
    )]
    pub relations: Option<String>,

    /// Project root the artifacts are placed in.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Project root (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Directory of `.stub` files overriding the built-in stubs.
    #[arg(long = "stubs", value_name = "DIR", help = "Custom stub directory")]
    pub stubs: Option<PathBuf>,

    /// How artifacts are placed in the project.
    #[arg(
        short = 'b',
        long = "backend",
        value_enum,
        help = "Scaffold backend (default from config: conventional)"
    )]
    pub backend: Option<BackendKind>,

    /// Reject relation tokens with an unknown kind instead of skipping them.
    #[arg(long = "strict-relations", help = "Fail on unknown relation kinds")]
    pub strict_relations: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,
}

/// Scaffold backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Write files at Laravel's conventional paths directly.
    #[default]
    Conventional,
    /// Run `php artisan make:*` and fill in the generated files.
    Artisan,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conventional => write!(f, "conventional"),
            Self::Artisan => write!(f, "artisan"),
        }
    }
}

// ── stubs ─────────────────────────────────────────────────────────────────────

/// Subcommands for `crudkit stubs`.
#[derive(Debug, Subcommand)]
pub enum StubsCommands {
    /// List available stubs and where each one comes from.
    #[command(visible_alias = "ls")]
    List {
        /// Stub directory to inspect alongside the built-ins.
        #[arg(long = "stubs", value_name = "DIR")]
        stubs: Option<PathBuf>,
    },
    /// Write the built-in stubs to a directory for customisation.
    Publish {
        /// Destination directory.
        #[arg(long = "dir", value_name = "DIR", default_value = "stubs")]
        dir: PathBuf,

        /// Overwrite stubs that already exist.
        #[arg(long = "force")]
        force: bool,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.crudkit.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crudkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `crudkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `relations.strict`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_make_command() {
        let cli = Cli::parse_from([
            "crudkit",
            "make",
            "Post",
            "--fields",
            "title:string,body:text",
            "--relations",
            "belongsTo:User:user_id:id",
        ]);
        let Commands::Make(args) = cli.command else {
            panic!("expected Make command");
        };
        assert_eq!(args.name, "Post");
        assert_eq!(args.fields, "title:string,body:text");
        assert_eq!(args.relations.as_deref(), Some("belongsTo:User:user_id:id"));
        assert_eq!(args.backend, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn make_requires_fields() {
        assert!(Cli::try_parse_from(["crudkit", "make", "Post"]).is_err());
    }

    #[test]
    fn backend_values() {
        let cli = Cli::parse_from(["crudkit", "m", "Post", "-f", "a:string", "-b", "artisan"]);
        let Commands::Make(args) = cli.command else {
            panic!("expected Make command");
        };
        assert_eq!(args.backend, Some(BackendKind::Artisan));
        assert_eq!(BackendKind::Conventional.to_string(), "conventional");
    }

    #[test]
    fn publish_defaults_to_stubs_dir() {
        let cli = Cli::parse_from(["crudkit", "stubs", "publish"]);
        let Commands::Stubs(StubsCommands::Publish { dir, force }) = cli.command else {
            panic!("expected stubs publish");
        };
        assert_eq!(dir, PathBuf::from("stubs"));
        assert!(!force);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["crudkit", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
