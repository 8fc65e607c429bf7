//! Backend-neutral figure model.
//!
//! A `Figure` is the single shared drawing surface of a composition: one log–log
//! `Axes` holding artists plus cosmetics. Rendering to pixels or SVG happens in
//! `render`, which only ever reads a figure.

pub mod artist;
pub mod axes;
pub mod color;

pub use artist::*;
pub use axes::*;
pub use color::*;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Figure {
    axes: Axes,
}

impl Figure {
    /// A fresh figure with one logarithmic axes pair and no artists.
    pub fn new() -> Self {
        Self { axes: Axes::new() }
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }

    /// Number of data artists (curves, bands, regions, annotations).
    ///
    /// Grid, legend, title and labels are axes properties and are not counted.
    pub fn data_artist_count(&self) -> usize {
        self.axes.artist_count()
    }
}
