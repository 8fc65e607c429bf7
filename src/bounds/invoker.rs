//! Failure-isolating invocation of bound layers.
//!
//! Around every call the invoker:
//! 1. snapshots the axes limits, the autoscale flag and the artist count
//! 2. turns autoscale off so the layer cannot silently rescale the view
//! 3. runs the layer, catching both returned errors and panics
//! 4. discards whatever a failed layer appended
//! 5. restores the exact limits and autoscale flag, on every path
//!
//! It does not bound execution time: a layer that never returns blocks the
//! whole composition.
//!
//! A contained panic still goes through the process panic hook first, so with
//! the default hook stderr shows a `thread '…' panicked at …` line ahead of the
//! `warn!` that records the layer as failed. Both describe the same failure;
//! the composition carries on and the report lists the layer as failed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use crate::bounds::{BoundEntry, BoundLayer, LayerError, LayerParams};
use crate::figure::Axes;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayerStatus {
    Drawn { artists: usize },
    Failed { reason: String },
}

/// Result of invoking one bound layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerOutcome {
    pub name: String,
    pub category: String,
    pub status: LayerStatus,
}

impl LayerOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, LayerStatus::Failed { .. })
    }
}

/// Invoke a catalog entry with its own parameters.
pub fn invoke_entry(entry: &BoundEntry, axes: &mut Axes) -> LayerOutcome {
    LayerOutcome {
        name: entry.name().to_string(),
        category: entry.category().to_string(),
        status: invoke_layer(entry.name(), entry.layer(), entry.params(), axes),
    }
}

/// Invoke `layer` against `axes`, isolating any failure.
pub fn invoke_layer(name: &str, layer: &dyn BoundLayer, params: &LayerParams, axes: &mut Axes) -> LayerStatus {
    let xlim = axes.xlim();
    let ylim = axes.ylim();
    let was_auto = axes.autoscale();
    let before = axes.artist_count();

    axes.set_autoscale(false);

    let result = panic::catch_unwind(AssertUnwindSafe(|| layer.draw(axes, params)))
        .unwrap_or_else(|payload| Err(LayerError::Panicked(panic_message(payload.as_ref()))));

    let status = match result {
        Ok(()) => {
            let artists = axes.artist_count().saturating_sub(before);
            debug!(layer = name, artists, "bound layer drawn");
            LayerStatus::Drawn { artists }
        }
        Err(err) => {
            warn!(layer = name, error = %err, "bound layer failed; skipping");
            axes.truncate_artists(before);
            LayerStatus::Failed {
                reason: err.to_string(),
            }
        }
    };

    axes.set_xlim(xlim.0, xlim.1);
    axes.set_ylim(ylim.0, ylim.1);
    axes.set_autoscale(was_auto);

    status
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
