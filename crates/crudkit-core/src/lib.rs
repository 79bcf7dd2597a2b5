//! crudkit core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the crudkit
//! CRUD scaffolding generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           crudkit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, TemplateService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (TemplateStore, ScaffoldBackend, Fs)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    crudkit-adapters (Infrastructure)    │
//! │ (InMemoryStore, ConventionalBackend..)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (FieldList, RelationList, RenderContext)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudkit_core::prelude::*;
//!
//! let service = GenerationService::new(TemplateService::new(store), backend, filesystem);
//! let request = GenerationRequest::new("Post", "title:string,body:text")
//!     .with_relations("belongsTo:User:user_id:id");
//! let report = service.generate(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationPlan, GenerationReport, GenerationService, TemplateService,
        ports::{Filesystem, ScaffoldBackend, TemplateStore},
    };
    pub use crate::domain::{
        Artifact, ArtifactKind, BareArtifactKind, EntityName, GenerationRequest, RenderContext,
        UnknownKindPolicy,
    };
    pub use crate::error::{CrudkitError, CrudkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
