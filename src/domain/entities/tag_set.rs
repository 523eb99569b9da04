//! Tag sets and their single-string storage form.
//!
//! Tags are persisted as one scalar: `{tag1,tag2}`. The format has no
//! escaping, so a tag containing `{`, `}` or `,` does not survive a round
//! trip. Other tooling reads this column, so the format must not change.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A set of case-sensitive tag strings.
///
/// Iteration and [`TagSet::encode`] are in lexical order so the stored form
/// is stable, but no ordering is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the storage form.
    ///
    /// Strips at most one leading `{` and one trailing `}`, then splits on
    /// `,`. Splitting an empty remainder yields one empty-string tag, so both
    /// `""` and `"{}"` decode to `{""}` rather than an empty set. Callers may
    /// rely on this; do not change it.
    pub fn decode(source: &str) -> Self {
        let trimmed = source.strip_prefix('{').unwrap_or(source);
        let trimmed = trimmed.strip_suffix('}').unwrap_or(trimmed);

        Self(trimmed.split(',').map(str::to_string).collect())
    }

    /// Encodes to the storage form. An empty set becomes `{}`.
    pub fn encode(&self) -> String {
        let joined = self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        format!("{{{joined}}}")
    }

    /// Adds every tag in `src`. Returns `true` if at least one tag was new.
    ///
    /// There is no removal: merging only ever grows the set.
    pub fn merge(&mut self, src: TagSet) -> bool {
        let before = self.0.len();
        self.0.extend(src.0);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TagSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
