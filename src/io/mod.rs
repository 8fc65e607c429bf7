//! Input/output helpers.
//!
//! - plot configuration files (`config`)
//! - limit-curve data files (`limit_data`)
//! - figure export to PNG/SVG/JSON and base64 (`export`)

pub mod config;
pub mod export;
pub mod limit_data;

pub use config::*;
pub use export::*;
pub use limit_data::*;
