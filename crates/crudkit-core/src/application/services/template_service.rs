//! Template Service - stub lookup and rendering.
//!
//! Fetches raw stub text from the store and fills it from a
//! [`RenderContext`]. Separated from GenerationService for single
//! responsibility.

use tracing::{debug, warn};

use crate::{
    application::ports::TemplateStore,
    domain::{ArtifactKind, RenderContext, find_placeholders},
    error::CrudkitResult,
};

/// Service for stub operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Raw stub text for an artifact kind.
    pub fn stub(&self, kind: ArtifactKind) -> CrudkitResult<String> {
        self.store.get_template(kind.template_name())
    }

    /// Names of every stub the store knows about.
    pub fn list(&self) -> CrudkitResult<Vec<String>> {
        self.store.list()
    }

    /// Render the stub for the context's artifact kind.
    ///
    /// The context must supply every placeholder of its kind. Markers the
    /// context has no value for (extra placeholders in a custom stub) are
    /// left in the output and reported with a warning.
    pub fn render(&self, context: &RenderContext) -> CrudkitResult<String> {
        let kind = context.kind();
        let raw = self.stub(kind)?;
        context.ensure_complete()?;

        let rendered = context.render(&raw);

        let leftover = find_placeholders(&rendered);
        if !leftover.is_empty() {
            warn!(
                template = kind.template_name(),
                placeholders = ?leftover,
                "Stub contains placeholders with no value; leaving them verbatim"
            );
        }
        debug!(template = kind.template_name(), bytes = rendered.len(), "Rendered stub");

        Ok(rendered)
    }
}
