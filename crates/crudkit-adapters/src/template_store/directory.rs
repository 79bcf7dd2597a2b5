//! Stub directory store.
//!
//! Loads `<dir>/<name>.stub` from disk on every lookup so edits to a stub
//! are picked up without restarting anything.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crudkit_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
    },
    error::CrudkitResult,
};

use crate::{builtin_templates, template_store::InMemoryStore};

/// Template store backed by a directory of `.stub` files.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    fallback: Option<InMemoryStore>,
}

/// Result of [`DirectoryStore::publish_builtin`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl DirectoryStore {
    /// Serve only the stubs found in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: None,
        }
    }

    /// Fall back to the built-in stubs for names missing from the directory.
    pub fn with_fallback(mut self) -> CrudkitResult<Self> {
        self.fallback = Some(InMemoryStore::with_builtin()?);
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write every built-in stub into `dir` as `<name>.stub`.
    ///
    /// Existing files are left alone unless `force` is set.
    #[instrument(skip_all, fields(dir = %dir.display(), force))]
    pub fn publish_builtin(
        fs: &dyn Filesystem,
        dir: &Path,
        force: bool,
    ) -> CrudkitResult<PublishOutcome> {
        fs.create_dir_all(dir)?;

        let mut outcome = PublishOutcome::default();
        for (name, text) in builtin_templates::BUILTIN_STUBS {
            let path = dir.join(format!("{name}.{}", builtin_templates::STUB_EXTENSION));
            if fs.exists(&path) && !force {
                debug!(path = %path.display(), "stub exists, skipping");
                outcome.skipped.push(path);
                continue;
            }
            fs.write_file(&path, text)?;
            outcome.written.push(path);
        }

        info!(
            written = outcome.written.len(),
            skipped = outcome.skipped.len(),
            "Published built-in stubs"
        );
        Ok(outcome)
    }

    fn read_from_disk(&self, name: &str) -> CrudkitResult<Option<String>> {
        for file_name in builtin_templates::file_names(name) {
            let path = self.root.join(&file_name);
            if !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "loading stub from directory");
            return fs::read_to_string(&path).map(Some).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: path.clone(),
                    reason: format!("Failed to read stub: {e}"),
                }
                .into()
            });
        }
        Ok(None)
    }
}

impl TemplateStore for DirectoryStore {
    fn get_template(&self, name: &str) -> CrudkitResult<String> {
        if let Some(text) = self.read_from_disk(name)? {
            return Ok(text);
        }
        match &self.fallback {
            Some(fallback) => {
                debug!(name, "stub not in directory, using built-in");
                fallback.get_template(name)
            }
            None => Err(ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()),
        }
    }

    fn list(&self) -> CrudkitResult<Vec<String>> {
        let mut names = BTreeSet::new();

        if self.root.is_dir() {
            for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
                let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                    path: self.root.clone(),
                    reason: format!("directory walk error: {e}"),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                let extension = path.extension().and_then(|e| e.to_str());
                if extension != Some(builtin_templates::STUB_EXTENSION) {
                    continue;
                }
                let file_name = entry.file_name().to_string_lossy();
                let name = match builtin_templates::template_name_for_file(&file_name) {
                    Some(known) => known.to_string(),
                    None => match path.file_stem() {
                        Some(stem) => stem.to_string_lossy().into_owned(),
                        None => continue,
                    },
                };
                names.insert(name);
            }
        }

        if let Some(fallback) = &self.fallback {
            names.extend(fallback.list()?);
        }

        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use crudkit_core::error::CrudkitError;
    use tempfile::TempDir;

    fn stub_dir(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp.path().join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn reads_stub_from_directory() {
        let temp = stub_dir(&[("model.stub", "class {{modelName}} {}")]);
        let store = DirectoryStore::new(temp.path());
        assert_eq!(store.get_template("model").unwrap(), "class {{modelName}} {}");
    }

    #[test]
    fn missing_stub_without_fallback_is_not_found() {
        let temp = stub_dir(&[]);
        let err = DirectoryStore::new(temp.path())
            .get_template("controller")
            .unwrap_err();
        assert!(matches!(
            err,
            CrudkitError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn fallback_fills_gaps() {
        let temp = stub_dir(&[("model.stub", "custom")]);
        let store = DirectoryStore::new(temp.path()).with_fallback().unwrap();

        assert_eq!(store.get_template("model").unwrap(), "custom");
        assert!(store.get_template("controller").unwrap().contains("{{controllerName}}"));
    }

    #[test]
    fn accepts_laravel_stub_file_names() {
        let temp = stub_dir(&[
            ("pivot_migration.stub", "pivot {{pivotTableName}}"),
            ("StoreRequest.stub", "store {{formRequestName}}"),
        ]);
        let store = DirectoryStore::new(temp.path());
        assert_eq!(store.get_template("pivotMigration").unwrap(), "pivot {{pivotTableName}}");
        assert_eq!(store.get_template("storeRequest").unwrap(), "store {{formRequestName}}");
    }

    #[test]
    fn list_merges_directory_and_builtin_names() {
        let temp = stub_dir(&[
            ("model.stub", ""),
            ("StoreRequest.stub", ""),
            ("observer.stub", ""),
            ("README.md", ""),
        ]);

        let bare = DirectoryStore::new(temp.path()).list().unwrap();
        assert_eq!(bare, ["model", "observer", "storeRequest"]);

        let merged = DirectoryStore::new(temp.path())
            .with_fallback()
            .unwrap()
            .list()
            .unwrap();
        assert_eq!(merged.len(), 7);
        assert!(merged.contains(&"observer".to_string()));
    }

    #[test]
    fn publish_skips_existing_unless_forced() {
        let fs = MemoryFilesystem::new();
        let dir = Path::new("/project/stubs");

        let first = DirectoryStore::publish_builtin(&fs, dir, false).unwrap();
        assert_eq!(first.written.len(), 6);
        assert!(first.skipped.is_empty());

        let second = DirectoryStore::publish_builtin(&fs, dir, false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 6);

        let forced = DirectoryStore::publish_builtin(&fs, dir, true).unwrap();
        assert_eq!(forced.written.len(), 6);
    }
}
