//! Business logic services for the application layer.

pub mod import_service;

pub use import_service::{ImportOutcome, ImportService, ImportSummary};
