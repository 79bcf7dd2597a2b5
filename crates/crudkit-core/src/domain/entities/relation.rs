//! Relation specifications.
//!
//! Relations are comma-separated `kind:Related:foreign_key:local_key` tuples:
//!
//! ```text
//! belongsTo:User:user_id:id,belongsToMany:Tag:tag_id:post_id
//! ```
//!
//! Each recognised relation becomes an accessor method on the generated
//! model. `belongsToMany` additionally yields a pivot-table migration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::domain::{error::DomainError, naming};

/// Number of `:`-separated parts in a relation token.
const RELATION_ARITY: usize = 4;

/// Closed set of supported relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    HasMany,
    BelongsTo,
    BelongsToMany,
    HasOne,
}

impl RelationKind {
    pub const ALL: [Self; 4] = [
        Self::HasMany,
        Self::BelongsTo,
        Self::BelongsToMany,
        Self::HasOne,
    ];

    /// The Eloquent method name used in the generated accessor.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HasMany => "hasMany",
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
            Self::HasOne => "hasOne",
        }
    }

    /// Whether the accessor returns a collection (and is therefore plural).
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::HasMany | Self::BelongsToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = ();

    /// Accepts the camelCase method names and their snake_case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hasMany" | "has_many" => Ok(Self::HasMany),
            "belongsTo" | "belongs_to" => Ok(Self::BelongsTo),
            "belongsToMany" | "belongs_to_many" => Ok(Self::BelongsToMany),
            "hasOne" | "has_one" => Ok(Self::HasOne),
            _ => Err(()),
        }
    }
}

/// A declared association between the scaffolded entity and another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSpec {
    pub kind: RelationKind,
    pub related_entity: String,
    pub foreign_key: String,
    pub local_or_related_key: String,
}

impl RelationSpec {
    /// Accessor method name on the generated model.
    ///
    /// Singular camelCase for `belongsTo`/`hasOne`, plural camelCase for
    /// `hasMany`/`belongsToMany`. Namespace qualifiers are dropped.
    pub fn accessor_name(&self) -> Result<String, DomainError> {
        let base = naming::base_name(&self.related_entity)?;
        if self.kind.is_collection() {
            naming::plural_camel_case(&base)
        } else {
            naming::camel_case(&base)
        }
    }

    /// Render the accessor method as it appears inside the model class.
    pub fn method_text(&self) -> Result<String, DomainError> {
        Ok(format!(
            "\n    public function {accessor}()\n    {{\n        return $this->{kind}({related}::class, '{fk}', '{lk}');\n    }}\n",
            accessor = self.accessor_name()?,
            kind = self.kind,
            related = self.related_entity,
            fk = self.foreign_key,
            lk = self.local_or_related_key,
        ))
    }

    /// Pivot table joining `entity` to this relation's related entity.
    ///
    /// Only meaningful for `belongsToMany`; `None` for every other kind.
    pub fn pivot_table_name(&self, entity: &str) -> Result<Option<String>, DomainError> {
        if self.kind != RelationKind::BelongsToMany {
            return Ok(None);
        }
        naming::pivot_table_name(entity, &self.related_entity).map(Some)
    }
}

/// How to treat relation tokens whose kind is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKindPolicy {
    /// Skip the token and log a warning.
    #[default]
    Skip,
    /// Reject the whole spec with `UnknownRelationKind`.
    Reject,
}

/// Parsed relations plus the tokens that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationList {
    relations: Vec<RelationSpec>,
    skipped: Vec<String>,
}

impl RelationList {
    /// Parse a raw relation spec.
    ///
    /// `None`, empty or whitespace-only input yields an empty list.
    ///
    /// # Errors
    ///
    /// - `MalformedRelationSpec` when a token does not have exactly four
    ///   non-empty parts
    /// - `UnknownRelationKind` for an unrecognised kind under
    ///   [`UnknownKindPolicy::Reject`]
    pub fn parse(spec: Option<&str>, policy: UnknownKindPolicy) -> Result<Self, DomainError> {
        let mut list = Self::default();
        let Some(spec) = spec.filter(|s| !s.trim().is_empty()) else {
            return Ok(list);
        };

        for (position, raw) in spec.split(',').enumerate() {
            let token = raw.trim();
            let parts: Vec<&str> = token.split(':').map(str::trim).collect();

            if parts.len() != RELATION_ARITY {
                return Err(DomainError::MalformedRelationSpec {
                    token: token.to_string(),
                    position,
                    reason: format!(
                        "expected kind:Related:foreign_key:local_key, found {} part(s)",
                        parts.len()
                    ),
                });
            }
            if parts.iter().any(|p| p.is_empty()) {
                return Err(DomainError::MalformedRelationSpec {
                    token: token.to_string(),
                    position,
                    reason: "relation parts cannot be empty".into(),
                });
            }

            let Ok(kind) = parts[0].parse::<RelationKind>() else {
                match policy {
                    UnknownKindPolicy::Reject => {
                        return Err(DomainError::UnknownRelationKind {
                            kind: parts[0].to_string(),
                            token: token.to_string(),
                        });
                    }
                    UnknownKindPolicy::Skip => {
                        warn!(kind = parts[0], token, "Skipping relation with unknown kind");
                        list.skipped.push(token.to_string());
                        continue;
                    }
                }
            };

            list.relations.push(RelationSpec {
                kind,
                related_entity: parts[1].to_string(),
                foreign_key: parts[2].to_string(),
                local_or_related_key: parts[3].to_string(),
            });
        }

        Ok(list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationSpec> {
        self.relations.iter()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Tokens dropped because of an unknown kind.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Concatenated accessor methods, ready for the model's `{{relations}}`.
    pub fn methods_text(&self) -> Result<String, DomainError> {
        self.relations
            .iter()
            .map(RelationSpec::method_text)
            .collect::<Result<Vec<_>, _>>()
            .map(|methods| methods.concat())
    }

    /// Many-to-many relations, in declaration order.
    pub fn many_to_many(&self) -> impl Iterator<Item = &RelationSpec> {
        self.relations
            .iter()
            .filter(|r| r.kind == RelationKind::BelongsToMany)
    }
}
