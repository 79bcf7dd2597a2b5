//! Infrastructure adapters for crudkit.
//!
//! This crate implements the ports defined in `crudkit-core::application::ports`.
//! It contains all filesystem and process I/O.

pub mod builtin_templates;
pub mod filesystem;
pub mod scaffold_backend;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use scaffold_backend::{ArtisanBackend, ConventionalBackend};
pub use template_store::{DirectoryStore, InMemoryStore, PublishOutcome};
