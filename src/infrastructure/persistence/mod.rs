//! Repository implementations.
//!
//! # Repositories
//!
//! - [`InMemoryLinkRepository`] - Map-backed link store

pub mod memory_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
