//! Application layer: merge policy and the import pipeline.
//!
//! - [`reconciler`] - Field-level merge of an import record into a link
//! - [`services::import_service::ImportService`] - Canonicalize, look up, reconcile, persist

pub mod reconciler;
pub mod services;
