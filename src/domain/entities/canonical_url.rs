//! Canonical URL identity.

use std::fmt;

/// The normalized form of a URL, used as a link's unique identity.
///
/// Only [`crate::utils::url_normalizer::Normalizer::canonicalize`] produces
/// values of this type. Equality is byte-exact on the normalized string.
/// Because normalization is idempotent, re-canonicalizing a stored identity
/// yields the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub(crate) fn from_normalized(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
