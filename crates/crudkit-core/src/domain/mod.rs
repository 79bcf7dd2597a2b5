// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for crudkit.
//!
//! Pure generation logic: naming transforms, spec parsing, rule derivation
//! and placeholder substitution. Template text, file placement and writing
//! are reached through ports defined in the application layer.
//!
//! - **No I/O**: nothing here touches the filesystem or spawns processes
//! - **Synchronous**: every operation is a plain function call
//! - **Immutable values**: parsed specs are Clone + PartialEq

pub mod entities;
pub mod error;
pub mod naming;

pub use entities::{
    Artifact, ArtifactKind, BareArtifactKind, FieldList, FieldSpec, GenerationRequest,
    GenerationState, RelationKind, RelationList, RelationSpec, RenderContext, RuleMode,
    StageTracker, UnknownKindPolicy, ValidationRuleSet, WrittenArtifact, derive_rules,
    find_placeholders,
};
pub use error::{DomainError, ErrorCategory};
pub use naming::EntityName;
