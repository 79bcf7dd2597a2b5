pub mod artifact;
pub mod field;
pub mod relation;
pub mod rules;
pub mod stage;
pub mod template;

pub use artifact::{Artifact, GenerationRequest, WrittenArtifact};
pub use field::{FieldList, FieldSpec};
pub use relation::{RelationKind, RelationList, RelationSpec, UnknownKindPolicy};
pub use rules::{RuleMode, ValidationRuleSet, derive_rules};
pub use stage::{GenerationState, StageTracker};
pub use template::{ArtifactKind, BareArtifactKind, RenderContext, find_placeholders};
