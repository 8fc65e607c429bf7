//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated viewport (`Viewport`) and its caller-side units (`ViewportUnits`)
//! - enabled model/bound names (`Selection`)
//! - the programmatic configuration (`PlotConfig`) and its tunables

pub mod types;

pub use types::*;
