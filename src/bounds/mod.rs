//! Bound layers: externally supplied routines that draw exclusion regions.
//!
//! Every routine conforms to one capability, [`BoundLayer`]: it receives the
//! shared axes and its keyword parameters and reports success or a
//! [`LayerError`]. The [`invoker`] is the only place that calls it, and it
//! keeps a misbehaving layer from corrupting the viewport or aborting the
//! composition.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::figure::Axes;

pub mod catalog;
pub mod invoker;
pub mod layers;
pub mod params;

pub use catalog::*;
pub use invoker::*;
pub use layers::*;

/// Keyword parameters forwarded to a layer, ordered by key.
pub type LayerParams = BTreeMap<String, serde_json::Value>;

/// Why a layer drew nothing.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("failed to load limit data '{path}': {message}")]
    Data { path: PathBuf, message: String },

    #[error("invalid parameter '{name}': {reason}")]
    Param { name: String, reason: String },

    #[error("layer panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

/// A routine that draws onto the shared axes.
pub trait BoundLayer {
    fn draw(&self, axes: &mut Axes, params: &LayerParams) -> Result<(), LayerError>;

    /// Short name of the implementation, for listings and logs.
    fn kind(&self) -> &'static str {
        "custom"
    }
}

impl<F> BoundLayer for F
where
    F: Fn(&mut Axes, &LayerParams) -> Result<(), LayerError>,
{
    fn draw(&self, axes: &mut Axes, params: &LayerParams) -> Result<(), LayerError> {
        self(axes, params)
    }
}
