//! Data Transfer Objects for import input.
//!
//! Import records are decoded with Serde into typed field bags at the
//! boundary; nothing past this module sees raw JSON.

pub mod import_record;

pub use import_record::{FieldBag, FieldValue, parse_records};
