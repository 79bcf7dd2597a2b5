//! Field specifications.
//!
//! A field spec is a compact, comma-separated list of `name:type` pairs:
//!
//! ```text
//! title:string,body:text,published_at:timestamp
//! ```
//!
//! The type token is used verbatim as the schema builder call in migrations
//! and as the type rule in validation requests.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Indentation between migration column declarations in the rendered stub.
const COLUMN_SEPARATOR: &str = "\n\t\t\t";

/// One `(name, type)` attribute of the scaffolded entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// `$table->string('title');`
    pub fn column_declaration(&self) -> String {
        format!("$table->{}('{}');", self.field_type, self.name)
    }
}

/// Ordered, duplicate-free list of fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldList {
    fields: Vec<FieldSpec>,
}

impl FieldList {
    /// Parse a raw field spec.
    ///
    /// The input is split on `,` first, then each token on its first `:`.
    /// Whitespace around tokens is ignored.
    ///
    /// # Errors
    ///
    /// - `MalformedFieldSpec` when the spec is empty, or a token lacks `:` or
    ///   has an empty name or type
    /// - `DuplicateField` when a name is declared twice
    pub fn parse(spec: &str) -> Result<Self, DomainError> {
        if spec.trim().is_empty() {
            return Err(DomainError::MalformedFieldSpec {
                token: spec.to_string(),
                position: 0,
                reason: "at least one field is required".into(),
            });
        }

        let mut fields = Vec::new();
        let mut seen = HashSet::new();

        for (position, raw) in spec.split(',').enumerate() {
            let token = raw.trim();
            let malformed = |reason: &str| DomainError::MalformedFieldSpec {
                token: token.to_string(),
                position,
                reason: reason.to_string(),
            };

            let (name, field_type) = token
                .split_once(':')
                .ok_or_else(|| malformed("expected name:type"))?;
            let (name, field_type) = (name.trim(), field_type.trim());

            if name.is_empty() {
                return Err(malformed("field name is empty"));
            }
            if field_type.is_empty() {
                return Err(malformed("field type is empty"));
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::DuplicateField {
                    name: name.to_string(),
                });
            }

            fields.push(FieldSpec::new(name, field_type));
        }

        Ok(Self { fields })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Quoted field names, in input order.
    pub fn fillable(&self) -> Vec<String> {
        self.fields.iter().map(|f| format!("'{}'", f.name)).collect()
    }

    /// `'title', 'body'`
    pub fn fillable_text(&self) -> String {
        self.fillable().join(", ")
    }

    pub fn migration_columns(&self) -> Vec<String> {
        self.fields.iter().map(FieldSpec::column_declaration).collect()
    }

    /// Column declarations joined with the stub's fixed indentation.
    pub fn migration_columns_text(&self) -> String {
        self.migration_columns().join(COLUMN_SEPARATOR)
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
