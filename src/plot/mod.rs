//! Model curves and terminal previews.
//!
//! - log-spaced mass grids (`grid`)
//! - model line/band generation (`curve`)
//! - ASCII preview of a composed figure (`ascii`)

pub mod ascii;
pub mod curve;
pub mod grid;

pub use ascii::*;
pub use curve::*;
pub use grid::*;
