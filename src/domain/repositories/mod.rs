//! Repository trait definitions for the domain layer.
//!
//! The import core never talks to a database directly. It consumes
//! [`LinkRepository`], implemented in `crate::infrastructure::persistence`
//! or by the embedding application.
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
