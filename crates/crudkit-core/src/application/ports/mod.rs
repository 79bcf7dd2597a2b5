//! Application ports (traits) for external dependencies.
//!
//! Adapters in `crudkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateStore`: Stub storage/retrieval
//!   - `ScaffoldBackend`: Bare artifact creation and migration lookup
//!   - `Filesystem`: File operations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, ScaffoldBackend, TemplateStore};
