//! Error types for the import core.
//!
//! Field-level errors ([`TagCodecError`], [`DateParseError`]) never abort a
//! record: the reconciler collects them as [`FieldError`]s and leaves the
//! affected field untouched. Storage errors ([`RepositoryError`]) surface as
//! [`ImportError`] and stop a batch.

/// Errors from decoding a tag set out of a loosely-typed value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TagCodecError {
    #[error("Incompatible type: expected a tag string, got {found}")]
    IncompatibleType { found: &'static str },
}

/// Errors from reading a timestamp out of an import record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    #[error("Unhandled date type: {found}")]
    UnhandledType { found: &'static str },

    #[error("Could not parse RFC 3339 date: {0}")]
    InvalidFormat(#[from] chrono::ParseError),

    #[error("Unix timestamp out of range: {0}")]
    OutOfRange(f64),
}

/// A single field of an import record that could not be merged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{field}: {source}")]
    Date {
        field: &'static str,
        #[source]
        source: DateParseError,
    },

    #[error("Tags: {0}")]
    Tags(#[from] TagCodecError),
}

/// Errors reported by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("A link with URL {0} already exists")]
    Conflict(String),

    #[error("Link {0} not found")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors that stop the import pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Could not look up link {url}: {source}")]
    Lookup {
        url: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Could not save link {url}: {source}")]
    Persistence {
        url: String,
        #[source]
        source: RepositoryError,
    },
}
