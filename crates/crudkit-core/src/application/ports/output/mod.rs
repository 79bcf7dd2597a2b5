//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `crudkit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::BareArtifactKind;
use crate::error::CrudkitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `crudkit_adapters::filesystem::LocalFilesystem` (production)
/// - `crudkit_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CrudkitResult<()>;

    /// Write content to a file, replacing what was there.
    fn write_file(&self, path: &Path, content: &str) -> CrudkitResult<()>;

    /// Read a file's content.
    fn read_file(&self, path: &Path) -> CrudkitResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// File names (not paths) directly inside `path`, in no particular order.
    fn list_dir(&self, path: &Path) -> CrudkitResult<Vec<String>>;
}

/// Port for stub storage and retrieval.
///
/// Implemented by:
/// - `crudkit_adapters::template_store::InMemoryStore` (built-in stubs)
/// - `crudkit_adapters::template_store::DirectoryStore` (user stubs on disk)
pub trait TemplateStore: Send + Sync {
    /// Raw stub text for a template name.
    ///
    /// Fails with `ApplicationError::TemplateNotFound` when absent.
    fn get_template(&self, name: &str) -> CrudkitResult<String>;

    /// Names of all available stubs, sorted.
    fn list(&self) -> CrudkitResult<Vec<String>>;
}

/// Port for placing generated artifacts in a project.
///
/// Implemented by:
/// - `crudkit_adapters::scaffold_backend::ConventionalBackend` (direct file creation)
/// - `crudkit_adapters::scaffold_backend::ArtisanBackend` (delegates to `php artisan`)
pub trait ScaffoldBackend: Send + Sync {
    /// Create an empty artifact of `kind` named `name`, returning its path.
    ///
    /// For migrations `name` is the migration name (`create_posts_table`);
    /// the returned path carries whatever prefix the backend adds.
    fn create_bare_artifact(&self, kind: BareArtifactKind, name: &str) -> CrudkitResult<PathBuf>;

    /// Newest file in `dir` whose name contains `fragment`.
    fn locate_latest_migration_file(
        &self,
        dir: &Path,
        fragment: &str,
    ) -> CrudkitResult<Option<String>>;
}
