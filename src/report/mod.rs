//! Terminal reporting: composition summaries and catalog listings.

pub mod format;

pub use format::*;
