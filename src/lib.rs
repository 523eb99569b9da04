//! # Bookmarks Core
//!
//! Reconciles externally exported bookmark records against a store of links
//! keyed by a canonical URL.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Links, canonical URLs, tag sets, repository traits
//! - **Application Layer** ([`application`]) - Merge policy and the import pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - Repository implementations
//! - **DTOs** ([`dto`]) - Typed import records decoded from JSON
//! - **Utilities** ([`utils`]) - URL parsing and the normalization rule engine
//!
//! ## Import Flow
//!
//! 1. The record's URL is canonicalized by [`utils::url_normalizer::Normalizer`]
//! 2. The existing link, if any, is fetched through [`domain::repositories::LinkRepository`]
//! 3. [`application::reconciler::reconcile`] merges the record field by field
//! 4. The link is saved only if something changed
//!
//! ## Configuration
//!
//! Rules are loaded once at startup via [`config::load_from_env`] and handed
//! to the normalizer. See [`config`] for the rule file format.
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookmarks_core::prelude::*;
//! use bookmarks_core::infrastructure::persistence::InMemoryLinkRepository;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = bookmarks_core::config::load_from_env()?;
//! bookmarks_core::telemetry::init(&config)?;
//! config.print_summary();
//! let service = ImportService::new(
//!     Arc::new(config.normalizer()),
//!     Arc::new(InMemoryLinkRepository::new()),
//! );
//! let records = parse_records(r#"[{"URL": "https://theguardian.com", "Tags": "{news}"}]"#)?;
//! let _summary = service.import_batch(&records).await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod infrastructure;
pub mod telemetry;
pub mod utils;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::reconciler::{Reconciled, reconcile};
    pub use crate::application::services::{ImportOutcome, ImportService, ImportSummary};
    pub use crate::domain::entities::{CanonicalUrl, Link, TagSet};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::dto::{FieldBag, FieldValue, parse_records};
    pub use crate::error::{FieldError, ImportError, RepositoryError};
    pub use crate::utils::url_normalizer::{Normalizer, ParsedUrl};
}
