//! In-process implementation of the link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{CanonicalUrl, Link};
use crate::domain::repositories::LinkRepository;
use crate::error::RepositoryError;

const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    links: HashMap<i64, Link>,
    by_url: HashMap<CanonicalUrl, i64>,
}

/// Link repository backed by a map.
///
/// Enforces the same uniqueness of canonical URLs a relational store would.
/// Useful for tests and for embedding the importer without a database.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    store: RwLock<Store>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.store.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_canonical_url(
        &self,
        url: &CanonicalUrl,
    ) -> Result<Option<Link>, RepositoryError> {
        let store = self.store.read().await;

        Ok(store
            .by_url
            .get(url)
            .and_then(|id| store.links.get(id))
            .cloned())
    }

    async fn save(&self, mut link: Link) -> Result<i64, RepositoryError> {
        let mut store = self.store.write().await;
        let owner = store.by_url.get(&link.url).copied();

        let id = match link.id {
            Some(id) => {
                let Some(previous) = store.links.get(&id) else {
                    return Err(RepositoryError::NotFound(id));
                };
                if owner.is_some_and(|owner| owner != id) {
                    return Err(RepositoryError::Conflict(link.url.to_string()));
                }
                let previous_url = previous.url.clone();
                store.by_url.remove(&previous_url);
                id
            }
            None => {
                if owner.is_some() {
                    return Err(RepositoryError::Conflict(link.url.to_string()));
                }
                store.next_id += 1;
                store.next_id
            }
        };

        link.id = Some(id);
        store.by_url.insert(link.url.clone(), id);
        store.links.insert(id, link);

        Ok(id)
    }

    async fn list(
        &self,
        page: i64,
        page_size: i64,
        only_public: bool,
    ) -> Result<Vec<Link>, RepositoryError> {
        let page = page.max(1);
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let offset = usize::try_from((page - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
        let limit = usize::try_from(page_size).unwrap_or(usize::MAX);

        let store = self.store.read().await;
        let mut links: Vec<&Link> = store
            .links
            .values()
            .filter(|link| !only_public || link.public)
            .collect();
        links.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then(b.id.cmp(&a.id)));

        Ok(links
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
