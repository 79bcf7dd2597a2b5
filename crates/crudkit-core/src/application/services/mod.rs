//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a CRUD slice" or "render a stub".

pub mod generation_service;
pub mod template_service;

pub use generation_service::{GenerationPlan, GenerationReport, GenerationService};
pub use template_service::TemplateService;
