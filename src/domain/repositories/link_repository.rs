//! Repository trait for link lookup and persistence.

use crate::domain::entities::{CanonicalUrl, Link};
use crate::error::RepositoryError;
use async_trait::async_trait;

/// Storage collaborator used by the import pipeline.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its canonical URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the store cannot be read.
    async fn find_by_canonical_url(&self, url: &CanonicalUrl)
    -> Result<Option<Link>, RepositoryError>;

    /// Inserts a new link (`id == None`) or overwrites an existing one.
    ///
    /// Returns the link's id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if inserting would duplicate a
    /// canonical URL, [`RepositoryError::NotFound`] if updating an id the
    /// store does not know, and [`RepositoryError::Storage`] on write failures.
    async fn save(&self, link: Link) -> Result<i64, RepositoryError>;

    /// Lists links, most recently saved first.
    ///
    /// # Arguments
    ///
    /// - `page` - Page number (1-indexed, values below 1 mean 1)
    /// - `page_size` - Items per page (values below 1 mean 50)
    /// - `only_public` - Restrict to links marked public
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the store cannot be read.
    async fn list(
        &self,
        page: i64,
        page_size: i64,
        only_public: bool,
    ) -> Result<Vec<Link>, RepositoryError>;
}
