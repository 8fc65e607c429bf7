//! `axion-limits` library crate.
//!
//! Composes the axion–photon coupling vs mass exclusion plot: QCD axion model
//! lines and bands, plus externally supplied bound layers, on shared log–log
//! axes. The binary (`axl`) is a thin wrapper around this library so that:
//!
//! - composition is testable without spawning processes
//! - other front-ends can drive the same `Composer`

pub mod app;
pub mod bounds;
pub mod cli;
pub mod compose;
pub mod domain;
pub mod error;
pub mod figure;
pub mod io;
pub mod models;
pub mod plot;
pub mod render;
pub mod report;
pub mod telemetry;
