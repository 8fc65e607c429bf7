//! What a composition actually drew.

use serde::Serialize;

use crate::bounds::LayerOutcome;

/// Per-composition summary: drawn models, per-layer outcomes, ignored names.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompositionReport {
    /// Models drawn, in catalog order.
    pub models: Vec<String>,
    /// One outcome per invoked bound layer, in catalog order.
    pub layers: Vec<LayerOutcome>,
    /// Selected model names absent from the model catalog.
    pub ignored_models: Vec<String>,
    /// Selected bound names absent from the bound catalog.
    pub ignored_bounds: Vec<String>,
}

impl CompositionReport {
    pub fn failed_layers(&self) -> impl Iterator<Item = &LayerOutcome> {
        self.layers.iter().filter(|o| o.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_layers().next().is_some()
    }
}
