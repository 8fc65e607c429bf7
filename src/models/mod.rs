//! Theoretical axion models and the coupling formula.
//!
//! Models are pure data; the formula is a small pure function so curve
//! generation and bound layers can share it.

pub mod catalog;
pub mod coupling;

pub use catalog::*;
pub use coupling::*;
