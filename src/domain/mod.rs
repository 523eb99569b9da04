//! Domain layer containing bookmark entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Links, canonical URLs and tag sets
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure. Merge policy for
//! incoming records lives in [`crate::application::reconciler`].

pub mod entities;
pub mod repositories;
