use std::sync::Arc;

use crate::generation::registry::GeneratorRegistry;
use crate::layout::LayoutConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Grid dimensions for every layout pass. Each request builds its own engine.
    pub layout_config: LayoutConfig,
    /// Question generators, keyed by (category, subcategory). Read-only after startup.
    pub registry: Arc<GeneratorRegistry>,
}
