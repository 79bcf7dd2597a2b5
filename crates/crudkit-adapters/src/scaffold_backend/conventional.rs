//! Backend that creates files at Laravel's conventional locations itself.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crudkit_core::{
    application::ports::{Filesystem, ScaffoldBackend},
    domain::BareArtifactKind,
    error::CrudkitResult,
};

use super::{MIGRATIONS_DIR, conventional_path, latest_matching};

/// `YYYY_MM_DD_HHMMSS`, the prefix Laravel gives migration files.
const MIGRATION_TIMESTAMP: &str = "%Y_%m_%d_%H%M%S";

/// Creates bare artifacts directly through a [`Filesystem`].
pub struct ConventionalBackend {
    root: PathBuf,
    fs: Box<dyn Filesystem>,
    fixed_timestamp: Option<String>,
}

impl ConventionalBackend {
    pub fn new(root: impl Into<PathBuf>, fs: Box<dyn Filesystem>) -> Self {
        Self {
            root: root.into(),
            fs,
            fixed_timestamp: None,
        }
    }

    /// Use a constant migration prefix instead of the current time.
    pub fn with_fixed_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.fixed_timestamp = Some(timestamp.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn timestamp(&self) -> String {
        match &self.fixed_timestamp {
            Some(ts) => ts.clone(),
            None => Local::now().format(MIGRATION_TIMESTAMP).to_string(),
        }
    }

    fn migration_path(&self, name: &str) -> PathBuf {
        self.root
            .join(MIGRATIONS_DIR)
            .join(format!("{}_{name}.php", self.timestamp()))
    }
}

impl ScaffoldBackend for ConventionalBackend {
    fn create_bare_artifact(&self, kind: BareArtifactKind, name: &str) -> CrudkitResult<PathBuf> {
        let path = match conventional_path(&self.root, kind, name) {
            Some(path) => path,
            None => self.migration_path(name),
        };

        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        if !self.fs.exists(&path) {
            self.fs.write_file(&path, "")?;
        }

        debug!(kind = %kind, path = %path.display(), "created bare artifact");
        Ok(path)
    }

    fn locate_latest_migration_file(
        &self,
        dir: &Path,
        fragment: &str,
    ) -> CrudkitResult<Option<String>> {
        if !self.fs.exists(dir) {
            return Ok(None);
        }
        Ok(latest_matching(self.fs.list_dir(dir)?, fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    fn backend(fs: &MemoryFilesystem) -> ConventionalBackend {
        ConventionalBackend::new("/project", Box::new(fs.clone()))
            .with_fixed_timestamp("2024_05_01_101500")
    }

    #[test]
    fn model_goes_under_app_models() {
        let fs = MemoryFilesystem::new();
        let path = backend(&fs)
            .create_bare_artifact(BareArtifactKind::Model, "Post")
            .unwrap();
        assert_eq!(path, PathBuf::from("/project/app/Models/Post.php"));
        assert_eq!(fs.contents(&path).as_deref(), Some(""));
    }

    #[test]
    fn migration_gets_timestamp_prefix() {
        let fs = MemoryFilesystem::new();
        let path = backend(&fs)
            .create_bare_artifact(BareArtifactKind::Migration, "create_posts_table")
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/project/database/migrations/2024_05_01_101500_create_posts_table.php")
        );
    }

    #[test]
    fn real_timestamp_has_laravel_shape() {
        let fs = MemoryFilesystem::new();
        let backend = ConventionalBackend::new("/p", Box::new(fs.clone()));
        let path = backend
            .create_bare_artifact(BareArtifactKind::Migration, "create_tags_table")
            .unwrap();
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        let prefix = file.strip_suffix("_create_tags_table.php").unwrap();
        assert_eq!(prefix.len(), "2024_05_01_101500".len());
        assert!(prefix.chars().all(|c| c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn existing_file_is_not_truncated() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/project/app/Models")).unwrap();
        fs.write_file(Path::new("/project/app/Models/Post.php"), "keep").unwrap();

        backend(&fs)
            .create_bare_artifact(BareArtifactKind::Model, "Post")
            .unwrap();
        assert_eq!(
            fs.contents(Path::new("/project/app/Models/Post.php")).as_deref(),
            Some("keep")
        );
    }

    #[test]
    fn locates_latest_migration() {
        let fs = MemoryFilesystem::new();
        let dir = Path::new("/project/database/migrations");
        fs.create_dir_all(dir).unwrap();
        for name in [
            "2024_01_01_000000_create_posts_table.php",
            "2024_02_01_000000_create_posts_table.php",
            "2024_03_01_000000_create_users_table.php",
        ] {
            fs.write_file(&dir.join(name), "").unwrap();
        }

        let backend = backend(&fs);
        assert_eq!(
            backend
                .locate_latest_migration_file(dir, "create_posts_table")
                .unwrap()
                .as_deref(),
            Some("2024_02_01_000000_create_posts_table.php")
        );
        assert_eq!(
            backend
                .locate_latest_migration_file(Path::new("/nowhere"), "x")
                .unwrap(),
            None
        );
    }
}
