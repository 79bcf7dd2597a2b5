//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not in
//! spec parsing. Parsing errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ArtifactKind;
use crate::error::ErrorCategory;

/// Errors that occur while fetching stubs, placing or writing artifacts.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No stub registered under this name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// The scaffold backend could not create or locate an artifact.
    #[error("Scaffold backend failed for {artifact} '{target}': {reason}")]
    ScaffoldBackend {
        artifact: ArtifactKind,
        target: String,
        reason: String,
    },

    /// An external command run by an adapter failed.
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No stub named '{}' is available", name),
                "Try: crudkit stubs list to see available stubs".into(),
                "Custom stub directories must contain <name>.stub files".into(),
            ],
            Self::ScaffoldBackend { artifact, .. } => vec![
                format!("The backend could not create the {} file", artifact),
                "Check that --path points at the project root".into(),
                "With --backend artisan, make sure php and artisan are available".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("'{}' did not complete", command),
                "Run it by hand to see its full output".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before this error were kept".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ScaffoldBackend { .. }
            | Self::CommandFailed { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
