//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A saved bookmark
//! - [`CanonicalUrl`] - The normalized URL identifying a link
//! - [`TagSet`] - A link's tags and their `{a,b}` storage form

pub mod canonical_url;
pub mod link;
pub mod tag_set;

pub use canonical_url::CanonicalUrl;
pub use link::Link;
pub use tag_set::TagSet;
