//! Import record boundary.
//!
//! Records arrive as JSON objects from external exports. Each known key is
//! decoded once into a [`FieldValue`] so the reconciler matches on a closed set
//! of shapes instead of inspecting raw JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::entities::TagSet;
use crate::error::TagCodecError;

/// A loosely-typed value from an import record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// Key missing, `null`, or a shape no field accepts (booleans, arrays, objects).
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "string",
            Self::Number(_) => "number",
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => n.as_f64().map_or(Self::Absent, Self::Number),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Self::Absent,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl TryFrom<&FieldValue> for TagSet {
    type Error = TagCodecError;

    /// Decodes a `{a,b}` tag string. Any non-string value is rejected.
    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Text(s) => Ok(TagSet::decode(s)),
            other => Err(TagCodecError::IncompatibleType {
                found: other.kind(),
            }),
        }
    }
}

/// One record of an import batch.
///
/// Keys follow the export format (`URL`, `Title`, ...). Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldBag {
    #[serde(rename = "URL")]
    pub url: FieldValue,
    #[serde(rename = "Title")]
    pub title: FieldValue,
    #[serde(rename = "Description")]
    pub description: FieldValue,
    /// Unix seconds or an RFC 3339 string.
    #[serde(rename = "ReadAt")]
    pub read_at: FieldValue,
    /// Unix seconds or an RFC 3339 string.
    #[serde(rename = "SavedAt")]
    pub saved_at: FieldValue,
    /// `{tag,tag}` string.
    #[serde(rename = "Tags")]
    pub tags: FieldValue,
}

impl FieldBag {
    /// Creates a record for `url` with every other field absent.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: FieldValue::Text(url.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<FieldValue>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<FieldValue>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_read_at(mut self, read_at: impl Into<FieldValue>) -> Self {
        self.read_at = read_at.into();
        self
    }

    pub fn with_saved_at(mut self, saved_at: impl Into<FieldValue>) -> Self {
        self.saved_at = saved_at.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<FieldValue>) -> Self {
        self.tags = tags.into();
        self
    }
}

/// Decodes a JSON array of records.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of objects.
pub fn parse_records(json: &str) -> Result<Vec<FieldBag>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let records = parse_records(
            r#"[{
                "URL": "https://theguardian.com/world",
                "Title": "World news",
                "Description": "",
                "ReadAt": 1700000000,
                "SavedAt": "2023-11-14T22:13:20Z",
                "Tags": "{news,uk}"
            }]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.url.as_text(), Some("https://theguardian.com/world"));
        assert_eq!(record.title, FieldValue::Text("World news".to_string()));
        assert_eq!(record.description, FieldValue::Text(String::new()));
        assert_eq!(record.read_at, FieldValue::Number(1_700_000_000.0));
        assert_eq!(record.saved_at.kind(), "string");
        assert_eq!(record.tags.as_text(), Some("{news,uk}"));
    }

    #[test]
    fn test_parse_missing_and_unknown_keys() {
        let records = parse_records(r#"[{"URL": "https://a.com", "Extra": 1}]"#).unwrap();
        let record = &records[0];

        assert!(record.title.is_absent());
        assert!(record.read_at.is_absent());
        assert!(record.tags.is_absent());
    }

    #[test]
    fn test_parse_unsupported_shapes_as_absent() {
        let records = parse_records(
            r#"[{"URL": null, "Title": true, "Description": ["x"], "Tags": {"a": 1}}]"#,
        )
        .unwrap();
        let record = &records[0];

        assert!(record.url.is_absent());
        assert!(record.title.is_absent());
        assert!(record.description.is_absent());
        assert!(record.tags.is_absent());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_records(r#"{"URL": "https://a.com"}"#).is_err());
    }

    #[test]
    fn test_tags_from_text() {
        let tags = TagSet::try_from(&FieldValue::from("{a,b}")).unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_tags_from_number_is_incompatible() {
        let err = TagSet::try_from(&FieldValue::Number(3.0)).unwrap_err();
        assert_eq!(err, TagCodecError::IncompatibleType { found: "number" });
    }

    #[test]
    fn test_builder() {
        let record = FieldBag::for_url("https://example.com/")
            .with_title("Example")
            .with_read_at(0i64)
            .with_tags("{x}");

        assert_eq!(record.url.as_text(), Some("https://example.com/"));
        assert_eq!(record.title.as_text(), Some("Example"));
        assert_eq!(record.read_at, FieldValue::Number(0.0));
        assert!(record.saved_at.is_absent());
    }
}
