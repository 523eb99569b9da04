//! Field-level merge of an import record into an existing link.

use chrono::{DateTime, Utc};

use crate::domain::entities::{CanonicalUrl, Link, TagSet};
use crate::dto::{FieldBag, FieldValue};
use crate::error::{DateParseError, FieldError};

/// Result of reconciling one record.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub link: Link,
    /// True if the link was created or any field actually changed.
    pub changed: bool,
    /// Fields that could not be parsed and were left as they were.
    pub rejected: Vec<FieldError>,
}

/// Merges `incoming` into `existing`, or into a fresh link for `url` when
/// there is no existing link.
///
/// # Merge Policy
///
/// - **Title, Description**: replaced by a non-empty string that differs
/// - **ReadAt, SavedAt**: replaced by a parsed date that differs, if the
///   current value is unset (Unix time < 1) or the new one is a real instant
///   (Unix time > 0). A known read time is never reset to the epoch sentinel.
/// - **Tags**: union with the decoded tag string, never removed
/// - **SavedAt** defaults to now if still unset (Unix time < 1), so an
///   epoch `SavedAt` is never stored
///
/// `url` is only used when creating; an existing link keeps its identity.
/// A field that fails to parse is reported in [`Reconciled::rejected`] and
/// left unchanged; the rest of the record still applies.
pub fn reconcile(existing: Option<Link>, url: CanonicalUrl, incoming: &FieldBag) -> Reconciled {
    let (mut link, mut saved_at, mut changed) = match existing {
        Some(link) => {
            let saved_at = Some(link.saved_at);
            (link, saved_at, false)
        }
        None => (Link::new(url, String::new(), String::new(), false), None, true),
    };
    let mut rejected = Vec::new();

    changed |= merge_string_field(&mut link.title, &incoming.title);
    changed |= merge_string_field(&mut link.description, &incoming.description);

    for (field, current, value) in [
        ("ReadAt", &mut link.read_at, &incoming.read_at),
        ("SavedAt", &mut saved_at, &incoming.saved_at),
    ] {
        match merge_date_field(current, value) {
            Ok(updated) => changed |= updated,
            Err(source) => {
                tracing::debug!(field, error = %source, "ignoring unparseable date");
                rejected.push(FieldError::Date { field, source });
            }
        }
    }

    if !incoming.tags.is_absent() {
        match TagSet::try_from(&incoming.tags) {
            Ok(tags) => changed |= link.tags.merge(tags),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring tags");
                rejected.push(e.into());
            }
        }
    }

    link.saved_at = saved_at
        .filter(|t| t.timestamp() > 0)
        .unwrap_or_else(Utc::now);

    Reconciled {
        link,
        changed,
        rejected,
    }
}

/// Replaces `current` with a non-empty, different string. Returns whether it changed.
fn merge_string_field(current: &mut String, incoming: &FieldValue) -> bool {
    match incoming.as_text() {
        Some(repl) if !repl.is_empty() && repl != current.as_str() => {
            *current = repl.to_string();
            true
        }
        _ => false,
    }
}

/// Applies the date replacement rule. Absent values are a no-op, not an error.
fn merge_date_field(
    current: &mut Option<DateTime<Utc>>,
    incoming: &FieldValue,
) -> Result<bool, DateParseError> {
    if incoming.is_absent() {
        return Ok(false);
    }

    let repl = parse_date(incoming)?;
    let current_unset = current.is_none_or(|t| t.timestamp() < 1);

    if *current != Some(repl) && (current_unset || repl.timestamp() > 0) {
        *current = Some(repl);
        return Ok(true);
    }

    Ok(false)
}

/// Parses Unix seconds (fraction truncated) or an RFC 3339 string.
///
/// # Errors
///
/// Returns [`DateParseError`] for absent values, malformed strings, and
/// timestamps outside the representable range.
pub fn parse_date(value: &FieldValue) -> Result<DateTime<Utc>, DateParseError> {
    match value {
        FieldValue::Number(secs) => {
            if !secs.is_finite() || *secs < i64::MIN as f64 || *secs >= i64::MAX as f64 {
                return Err(DateParseError::OutOfRange(*secs));
            }
            DateTime::from_timestamp(*secs as i64, 0).ok_or(DateParseError::OutOfRange(*secs))
        }
        FieldValue::Text(s) => Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)),
        FieldValue::Absent => Err(DateParseError::UnhandledType {
            found: value.kind(),
        }),
    }
}
