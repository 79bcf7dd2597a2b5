//! Application layer for crudkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Parsing and naming rules live in `crate::domain`; this layer wires them to
//! the template store, the scaffold backend and the filesystem.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GenerationPlan, GenerationReport, GenerationService, TemplateService};

pub use ports::{Filesystem, ScaffoldBackend, TemplateStore};

pub use error::ApplicationError;
