//! Import pipeline: canonicalize, look up, reconcile, persist.

use std::sync::Arc;

use crate::application::reconciler::reconcile;
use crate::domain::repositories::LinkRepository;
use crate::dto::FieldBag;
use crate::error::ImportError;
use crate::utils::url_normalizer::Normalizer;

/// What happened to a single imported record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Created(i64),
    Updated(i64),
    Unchanged,
}

/// Counts for a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Records without a string `URL`.
    pub skipped: usize,
}

/// Service reconciling import records against stored links.
///
/// Records are handled strictly one at a time: each is looked up, merged and
/// saved before the next one starts.
pub struct ImportService<R: LinkRepository> {
    normalizer: Arc<Normalizer>,
    link_repository: Arc<R>,
}

impl<R: LinkRepository> ImportService<R> {
    /// Creates a new import service.
    pub fn new(normalizer: Arc<Normalizer>, link_repository: Arc<R>) -> Self {
        Self {
            normalizer,
            link_repository,
        }
    }

    /// Imports one record identified by `url`.
    ///
    /// The link is saved only if reconciliation changed something. Fields that
    /// fail to parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Lookup`] or [`ImportError::Persistence`] when the
    /// repository fails. Nothing else is fatal. A failed lookup is fatal
    /// because treating it as "not found" would save a duplicate link.
    pub async fn import_one(
        &self,
        url: &str,
        fields: &FieldBag,
    ) -> Result<ImportOutcome, ImportError> {
        let canonical = self.normalizer.canonicalize(url);

        let existing = self
            .link_repository
            .find_by_canonical_url(&canonical)
            .await
            .map_err(|source| ImportError::Lookup {
                url: canonical.to_string(),
                source,
            })?;
        let created = existing.is_none();

        let result = reconcile(existing, canonical, fields);

        for rejected in &result.rejected {
            tracing::warn!(url = %result.link.url, error = %rejected, "field left unchanged");
        }

        if !result.changed {
            tracing::debug!(url = %result.link.url, "link unchanged");
            return Ok(ImportOutcome::Unchanged);
        }

        let url = result.link.url.to_string();
        let id = self
            .link_repository
            .save(result.link)
            .await
            .map_err(|source| ImportError::Persistence {
                url: url.clone(),
                source,
            })?;

        if created {
            tracing::info!(id, url = %url, "link created");
            Ok(ImportOutcome::Created(id))
        } else {
            tracing::info!(id, url = %url, "link updated");
            Ok(ImportOutcome::Updated(id))
        }
    }

    /// Imports records in order.
    ///
    /// Records whose `URL` is not a string are skipped. The first storage
    /// error aborts the batch; links saved before it stay saved.
    ///
    /// # Errors
    ///
    /// See [`Self::import_one`].
    pub async fn import_batch(&self, records: &[FieldBag]) -> Result<ImportSummary, ImportError> {
        let mut summary = ImportSummary {
            total: records.len(),
            ..ImportSummary::default()
        };

        for (index, record) in records.iter().enumerate() {
            let Some(url) = record.url.as_text() else {
                tracing::warn!(index, found = record.url.kind(), "record has no URL, skipping");
                summary.skipped += 1;
                continue;
            };

            match self.import_one(url, record).await? {
                ImportOutcome::Created(_) => summary.created += 1,
                ImportOutcome::Updated(_) => summary.updated += 1,
                ImportOutcome::Unchanged => summary.unchanged += 1,
            }
        }

        tracing::info!(
            total = summary.total,
            created = summary.created,
            updated = summary.updated,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "import finished"
        );

        Ok(summary)
    }
}
