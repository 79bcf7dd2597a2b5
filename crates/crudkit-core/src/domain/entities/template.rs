//! Artifact kinds, render contexts and placeholder substitution.
//!
//! Stubs use `{{name}}` placeholders. Each [`ArtifactKind`] statically lists
//! the placeholders its stub is expected to use; a [`RenderContext`] built for
//! that kind must supply all of them before anything is rendered, so a
//! forgotten value shows up as an error instead of a literal `{{name}}` in the
//! generated file.
//!
//! ```text
//! ┌──────────────┐  get_template(name)  ┌──────────────┐
//! │ ArtifactKind │ ───────────────────▶ │ TemplateStore│
//! └──────┬───────┘                      └──────┬───────┘
//!        │ placeholders()                      │ raw stub
//!        ▼                                     ▼
//! ┌──────────────┐      render(text)    ┌──────────────┐
//! │ RenderContext│ ───────────────────▶ │ rendered text│
//! └──────────────┘                      └──────────────┘
//! ```

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

// ============================================================================
// ArtifactKind
// ============================================================================

/// One kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    Model,
    Migration,
    PivotMigration,
    Controller,
    StoreRequest,
    UpdateRequest,
}

impl ArtifactKind {
    pub const ALL: [Self; 6] = [
        Self::Model,
        Self::Migration,
        Self::PivotMigration,
        Self::Controller,
        Self::StoreRequest,
        Self::UpdateRequest,
    ];

    /// Name under which the stub is looked up in the template store.
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Migration => "migration",
            Self::PivotMigration => "pivotMigration",
            Self::Controller => "controller",
            Self::StoreRequest => "storeRequest",
            Self::UpdateRequest => "updateRequest",
        }
    }

    /// Placeholders a render context for this kind must supply.
    pub const fn placeholders(self) -> &'static [&'static str] {
        match self {
            Self::Model => &["modelName", "tableName", "fillable", "relations"],
            Self::Migration => &["tableName", "fields"],
            Self::PivotMigration => &["pivotTableName", "foreignKey", "relatedKey"],
            Self::Controller => &[
                "controllerName",
                "modelName",
                "modelVariable",
                "storeRequestName",
                "updateRequestName",
            ],
            Self::StoreRequest | Self::UpdateRequest => &["formRequestName", "rules"],
        }
    }

    /// What the scaffold backend has to create for this kind.
    pub const fn bare_kind(self) -> BareArtifactKind {
        match self {
            Self::Model => BareArtifactKind::Model,
            Self::Migration | Self::PivotMigration => BareArtifactKind::Migration,
            Self::Controller => BareArtifactKind::Controller,
            Self::StoreRequest | Self::UpdateRequest => BareArtifactKind::Request,
        }
    }

    /// Look a kind up by its template name.
    pub fn from_template_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.template_name() == name)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

/// File skeleton kinds understood by a scaffold backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BareArtifactKind {
    Model,
    Migration,
    Controller,
    Request,
}

impl BareArtifactKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Migration => "migration",
            Self::Controller => "controller",
            Self::Request => "request",
        }
    }
}

impl fmt::Display for BareArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Placeholder values for rendering a single artifact.
///
/// Keys are kept in insertion order so that rendering is deterministic.
#[derive(Debug, Clone)]
pub struct RenderContext {
    kind: ArtifactKind,
    variables: Vec<(&'static str, String)>,
}

impl RenderContext {
    pub fn new(kind: ArtifactKind) -> Self {
        Self {
            kind,
            variables: Vec::with_capacity(kind.placeholders().len()),
        }
    }

    /// Add or replace a value, consuming self.
    pub fn with_variable(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.variables.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.variables.push((key, value)),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check that every placeholder required by the kind has a value.
    ///
    /// # Errors
    ///
    /// `MissingPlaceholder` naming the first absent key.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        match self
            .kind
            .placeholders()
            .iter()
            .find(|p| self.get(p).is_none())
        {
            Some(missing) => Err(DomainError::MissingPlaceholder {
                template: self.kind.template_name(),
                placeholder: *missing,
            }),
            None => Ok(()),
        }
    }

    /// Replace every `{{key}}` occurrence with its value in one pass.
    ///
    /// Placeholders without a value in this context are left verbatim, and
    /// substituted text is never scanned again.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            let hit = after
                .find(CLOSE)
                .and_then(|end| self.get(&after[..end]).map(|value| (end, value)));

            match hit {
                Some((end, value)) => {
                    out.push_str(&rest[..start]);
                    out.push_str(value);
                    rest = &after[end + CLOSE.len()..];
                }
                None => {
                    out.push_str(&rest[..=start]);
                    rest = &rest[start + 1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Names of every `{{identifier}}` marker left in `text`, in order of
/// appearance, without duplicates.
pub fn find_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            break;
        };
        let candidate = &after[..end];
        let is_identifier = !candidate.is_empty()
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if is_identifier {
            if !found.iter().any(|f| f == candidate) {
                found.push(candidate.to_string());
            }
            rest = &after[end + CLOSE.len()..];
        } else {
            rest = &rest[start + 1..];
        }
    }

    found
}
