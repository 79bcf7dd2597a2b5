//! Backend that delegates file creation to `php artisan make:*`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use crudkit_core::{
    application::{ApplicationError, ports::ScaffoldBackend},
    domain::BareArtifactKind,
    error::CrudkitResult,
};

use super::{MIGRATIONS_DIR, conventional_path, latest_matching};
use crate::filesystem::map_io_error;

const DEFAULT_PHP: &str = "php";

/// Runs Laravel's own generators in the project root.
#[derive(Debug, Clone)]
pub struct ArtisanBackend {
    root: PathBuf,
    php: String,
}

impl ArtisanBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            php: DEFAULT_PHP.to_string(),
        }
    }

    /// PHP interpreter to invoke `artisan` with.
    pub fn with_php(mut self, php: impl Into<String>) -> Self {
        self.php = php.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artisan(&self, kind: BareArtifactKind, name: &str) -> CrudkitResult<()> {
        let subcommand = format!("make:{kind}");
        let command_line = format!("{} artisan {subcommand} {name}", self.php);
        debug!(command = %command_line, "running artisan");

        let output = Command::new(&self.php)
            .arg("artisan")
            .arg(&subcommand)
            .arg(name)
            .current_dir(&self.root)
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::CommandFailed {
                command: command_line,
                reason: format!("{}: {}", output.status, stderr.trim()),
            }
            .into());
        }
        debug!(stdout = %String::from_utf8_lossy(&output.stdout).trim(), "artisan finished");
        Ok(())
    }
}

impl ScaffoldBackend for ArtisanBackend {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn create_bare_artifact(&self, kind: BareArtifactKind, name: &str) -> CrudkitResult<PathBuf> {
        self.artisan(kind, name)?;

        if let Some(path) = conventional_path(&self.root, kind, name) {
            return Ok(path);
        }

        let dir = self.root.join(MIGRATIONS_DIR);
        match self.locate_latest_migration_file(&dir, name)? {
            Some(file) => Ok(dir.join(file)),
            None => Err(ApplicationError::CommandFailed {
                command: format!("{} artisan make:migration {name}", self.php),
                reason: format!("no migration containing '{name}' in {}", dir.display()),
            }
            .into()),
        }
    }

    fn locate_latest_migration_file(
        &self,
        dir: &Path,
        fragment: &str,
    ) -> CrudkitResult<Option<String>> {
        if !dir.is_dir() {
            return Ok(None);
        }
        let entries =
            std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "list directory"))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(dir, e, "list directory"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(latest_matching(names, fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::error::CrudkitError;
    use tempfile::TempDir;

    #[test]
    fn missing_interpreter_is_command_failure() {
        let temp = TempDir::new().unwrap();
        let backend = ArtisanBackend::new(temp.path()).with_php("crudkit-no-such-php");

        let err = backend
            .create_bare_artifact(BareArtifactKind::Model, "Post")
            .unwrap_err();
        assert!(matches!(
            err,
            CrudkitError::Application(ApplicationError::CommandFailed { ref command, .. })
                if command == "crudkit-no-such-php artisan make:model Post"
        ));
    }

    // `true` accepts any arguments and succeeds, standing in for artisan.
    #[cfg(unix)]
    #[test]
    fn resolves_paths_after_successful_command() {
        let temp = TempDir::new().unwrap();
        let migrations = temp.path().join(MIGRATIONS_DIR);
        std::fs::create_dir_all(&migrations).unwrap();
        std::fs::write(
            migrations.join("2024_05_01_000000_create_posts_table.php"),
            "",
        )
        .unwrap();

        let backend = ArtisanBackend::new(temp.path()).with_php("true");

        assert_eq!(
            backend
                .create_bare_artifact(BareArtifactKind::Controller, "PostController")
                .unwrap(),
            temp.path().join("app/Http/Controllers/PostController.php")
        );
        assert_eq!(
            backend
                .create_bare_artifact(BareArtifactKind::Migration, "create_posts_table")
                .unwrap(),
            migrations.join("2024_05_01_000000_create_posts_table.php")
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_status() {
        let temp = TempDir::new().unwrap();
        let backend = ArtisanBackend::new(temp.path()).with_php("false");

        let err = backend
            .create_bare_artifact(BareArtifactKind::Request, "PostStoreRequest")
            .unwrap_err();
        assert!(matches!(
            err,
            CrudkitError::Application(ApplicationError::CommandFailed { .. })
        ));
    }
}
