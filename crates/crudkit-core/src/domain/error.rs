// ============================================================================
// domain/error.rs - GENERATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Malformed field spec at position {position} ('{token}'): {reason}")]
    MalformedFieldSpec {
        token: String,
        position: usize,
        reason: String,
    },

    #[error("Duplicate field '{name}' in field spec")]
    DuplicateField { name: String },

    #[error("Malformed relation spec at position {position} ('{token}'): {reason}")]
    MalformedRelationSpec {
        token: String,
        position: usize,
        reason: String,
    },

    #[error("Unknown relation kind '{kind}' in '{token}'")]
    UnknownRelationKind { kind: String, token: String },

    // ========================================================================
    // Rendering contract violations
    // ========================================================================
    #[error("Render context for '{template}' is missing placeholder '{placeholder}'")]
    MissingPlaceholder {
        template: &'static str,
        placeholder: &'static str,
    },

    #[error("Illegal generation state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{}' cannot be used as an entity name", name),
                "Use a non-empty name such as Post or BlogPost".into(),
            ],
            Self::MalformedFieldSpec { token, .. } => vec![
                format!("Check the field token '{}'", token),
                "Fields are written as name:type, separated by commas".into(),
                "Example: --fields \"title:string,body:text\"".into(),
            ],
            Self::DuplicateField { name } => vec![
                format!("Field '{}' is declared more than once", name),
                "Remove the duplicate declaration".into(),
            ],
            Self::MalformedRelationSpec { token, .. } => vec![
                format!("Check the relation token '{}'", token),
                "Relations are written as kind:Related:foreign_key:local_key".into(),
                "Example: --relations \"belongsTo:User:user_id:id\"".into(),
            ],
            Self::UnknownRelationKind { kind, .. } => vec![
                format!("'{}' is not a relation kind", kind),
                "Supported kinds: hasMany, belongsTo, belongsToMany, hasOne".into(),
                "Drop --strict-relations to skip unknown kinds with a warning".into(),
            ],
            Self::MissingPlaceholder { template, .. } => vec![
                format!("The '{}' artifact was rendered with an incomplete context", template),
                "This is a bug in crudkit, please report it".into(),
            ],
            Self::InvalidTransition { .. } => {
                vec!["This is a bug in crudkit, please report it".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::MalformedFieldSpec { .. }
            | Self::DuplicateField { .. }
            | Self::MalformedRelationSpec { .. }
            | Self::UnknownRelationKind { .. } => ErrorCategory::Validation,
            Self::MissingPlaceholder { .. } | Self::InvalidTransition { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
