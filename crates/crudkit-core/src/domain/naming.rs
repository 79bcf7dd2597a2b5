//! Naming transforms.
//!
//! Every identifier emitted into a generated artifact (table names, accessor
//! names, class names, pivot tables) is derived from a free-form name through
//! the functions in this module. They are pure and total over non-empty input;
//! empty or whitespace-only input fails fast with [`DomainError::InvalidName`].
//!
//! ## Examples
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | "BlogPost" | `snake_case` | "blog_post" |
//! | "BlogPost" | `plural_snake_case` | "blog_posts" |
//! | "BlogPost" | `camel_case` | "blogPost" |
//! | "Category" | `plural_camel_case` | "categories" |
//! | "App\\Models\\User" | `base_name` | "User" |
//!
//! Case conversion and the regular inflection rules come from `Inflector`.
//! Irregular and uncountable nouns are resolved from the tables below before
//! `Inflector` sees the word, and only the last snake segment of a compound
//! name is inflected (`blog_person` → `blog_people`).

use std::fmt;

use inflector::Inflector;
use serde::Serialize;

use crate::domain::error::DomainError;

/// Separators that qualify a class name with a namespace or path.
const QUALIFIERS: [&str; 3] = ["\\", "/", "::"];

/// Irregular `(singular, plural)` pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("criterion", "criteria"),
    ("cactus", "cacti"),
    ("analysis", "analyses"),
    ("status", "statuses"),
    ("alias", "aliases"),
    ("bus", "buses"),
    ("campus", "campuses"),
    ("virus", "viruses"),
    ("move", "moves"),
];

/// Words with identical singular and plural forms.
const UNCOUNTABLE: &[&str] = &[
    "news",
    "equipment",
    "information",
    "feedback",
    "metadata",
    "money",
    "rice",
    "series",
    "species",
    "sheep",
    "fish",
    "deer",
    "software",
    "hardware",
    "knowledge",
    "traffic",
];

#[derive(Clone, Copy)]
enum Number {
    Singular,
    Plural,
}

/// Inflect a single lowercase word.
fn inflect_word(word: &str, number: Number) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    for &(singular, plural) in IRREGULAR {
        if word == singular || word == plural {
            return match number {
                Number::Singular => singular,
                Number::Plural => plural,
            }
            .to_string();
        }
    }
    match number {
        Number::Singular => word.to_singular(),
        Number::Plural => word.to_plural(),
    }
}

/// Inflect the last segment of a snake_case name.
fn inflect_snake(snake: &str, number: Number) -> String {
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", inflect_word(last, number)),
        None => inflect_word(snake, number),
    }
}

fn require_name(input: &str) -> Result<&str, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName {
            name: input.to_string(),
            reason: "name cannot be empty".into(),
        });
    }
    Ok(trimmed)
}

/// Strip any namespace/path qualifier, keeping only the final segment.
pub fn base_name(input: &str) -> Result<String, DomainError> {
    let name = require_name(input)?;

    let mut start = 0;
    for sep in QUALIFIERS {
        if let Some(idx) = name.rfind(sep) {
            start = start.max(idx + sep.len());
        }
    }

    require_name(&name[start..]).map(str::to_string)
}

/// `BlogPost` → `blog_post`
pub fn snake_case(input: &str) -> Result<String, DomainError> {
    Ok(require_name(input)?.to_snake_case())
}

/// `BlogPost` → `blog_posts`
pub fn plural_snake_case(input: &str) -> Result<String, DomainError> {
    Ok(inflect_snake(&snake_case(input)?, Number::Plural))
}

/// `BlogPost` → `blogPost`
pub fn camel_case(input: &str) -> Result<String, DomainError> {
    Ok(require_name(input)?.to_camel_case())
}

/// `BlogPost` → `blogPosts`
pub fn plural_camel_case(input: &str) -> Result<String, DomainError> {
    Ok(plural_snake_case(input)?.to_camel_case())
}

/// `blog_post` → `BlogPost`
pub fn studly_case(input: &str) -> Result<String, DomainError> {
    Ok(require_name(input)?.to_pascal_case())
}

/// `BlogTags` → `blog_tag`
pub fn singularize(input: &str) -> Result<String, DomainError> {
    Ok(inflect_snake(&snake_case(input)?, Number::Singular))
}

/// Join-table name for a many-to-many relation.
///
/// Both names are reduced to their base name, singularized and snake-cased,
/// then sorted so that `(Post, Tag)` and `(Tag, Post)` agree on `post_tag`.
pub fn pivot_table_name(left: &str, right: &str) -> Result<String, DomainError> {
    let mut pair = [pivot_segment(left)?, pivot_segment(right)?];
    pair.sort();
    Ok(pair.join("_"))
}

fn pivot_segment(name: &str) -> Result<String, DomainError> {
    singularize(&base_name(name)?)
}

// ============================================================================
// EntityName - validated scaffold subject
// ============================================================================

/// The validated name of the entity being scaffolded.
///
/// Construction checks the name once; every derived identifier is then
/// infallible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    /// Parse an entity name.
    ///
    /// # Errors
    ///
    /// `InvalidName` when the name is empty, contains whitespace, or its base
    /// segment does not start with an ASCII letter.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let name = require_name(input)?;

        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidName {
                name: input.to_string(),
                reason: "name cannot contain whitespace".into(),
            });
        }

        let base = base_name(name)?;
        let valid_start = base.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        let valid_chars = base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_start || !valid_chars {
            return Err(DomainError::InvalidName {
                name: input.to_string(),
                reason: "name must start with a letter and contain only letters, digits or '_'"
                    .into(),
            });
        }

        Ok(Self(base))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Post` → `posts`
    pub fn table_name(&self) -> String {
        inflect_snake(&self.0.to_snake_case(), Number::Plural)
    }

    /// `Post` → `create_posts_table`
    pub fn migration_name(&self) -> String {
        format!("create_{}_table", self.table_name())
    }

    pub fn controller_name(&self) -> String {
        format!("{}Controller", self.0)
    }

    pub fn store_request_name(&self) -> String {
        format!("{}StoreRequest", self.0)
    }

    pub fn update_request_name(&self) -> String {
        format!("{}UpdateRequest", self.0)
    }

    /// Variable bound to a model instance in controller actions.
    pub fn variable_name(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
