use std::path::PathBuf;

use serde::Serialize;

use super::template::ArtifactKind;

/// Raw input for one scaffold invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationRequest {
    pub entity_name: String,
    pub field_spec: String,
    pub relation_spec: Option<String>,
}

impl GenerationRequest {
    pub fn new(entity_name: impl Into<String>, field_spec: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            field_spec: field_spec.into(),
            relation_spec: None,
        }
    }

    pub fn with_relations(mut self, relation_spec: impl Into<String>) -> Self {
        self.relation_spec = Some(relation_spec.into());
        self
    }
}

/// A fully rendered file, not yet placed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub artifact_kind: ArtifactKind,
    pub target_name: String,
    pub rendered_text: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, target_name: impl Into<String>, text: String) -> Self {
        Self {
            artifact_kind: kind,
            target_name: target_name.into(),
            rendered_text: text,
        }
    }
}

/// An artifact after the backend placed it and its text was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenArtifact {
    pub artifact_kind: ArtifactKind,
    pub target_name: String,
    pub path: PathBuf,
}
