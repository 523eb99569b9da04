//! Infrastructure layer for storage integrations.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link repository implementations

pub mod persistence;
