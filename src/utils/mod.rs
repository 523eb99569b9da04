//! Utility functions for URL processing.
//!
//! - [`url_normalizer`] - Best-effort URL splitting and the normalization rule engine

pub mod url_normalizer;
