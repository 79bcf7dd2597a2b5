//! Unified error handling for crudkit core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for crudkit core operations.
#[derive(Debug, Error, Clone)]
pub enum CrudkitError {
    /// Errors from the domain layer (spec parsing, naming, rendering contract).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (stores, backends, filesystem).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CrudkitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in crudkit".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type CrudkitResult<T> = Result<T, CrudkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_wrapped_error() {
        let parse: CrudkitError = DomainError::DuplicateField {
            name: "title".into(),
        }
        .into();
        assert_eq!(parse.category(), ErrorCategory::Validation);

        let missing: CrudkitError = ApplicationError::TemplateNotFound {
            name: "model".into(),
        }
        .into();
        assert_eq!(missing.category(), ErrorCategory::NotFound);

        let lock: CrudkitError = ApplicationError::StoreLockError.into();
        assert_eq!(lock.category(), ErrorCategory::Internal);
    }

    #[test]
    fn display_is_transparent_for_wrapped_errors() {
        let err: CrudkitError = ApplicationError::TemplateNotFound {
            name: "controller".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Template not found: controller");
    }
}
