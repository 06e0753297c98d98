//! Field type definitions
//!
//! Mirrors the `type` tags of an Elasticsearch index mapping. The compilers only
//! act on a handful of them, the rest are kept so a mapping round-trips.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field data type as declared in the index mapping
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Analyzed full-text field
    Text,

    /// Exact match keyword field
    ///
    /// Keyword fields are indexed as a single term and drive the exact-match
    /// filters built from query parameters.
    Keyword,

    /// Date/time field, filterable with `_lte` / `_gte` companions
    Date,

    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    ScaledFloat,
    Boolean,

    /// Object with its own `properties`
    Object,

    /// Nested documents with their own `properties`
    Nested,

    /// Suggester field
    Completion,

    /// Any type this crate does not interpret
    #[serde(other)]
    Other,
}

impl FieldType {
    /// Get the mapping tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Date => "date",
            FieldType::Long => "long",
            FieldType::Integer => "integer",
            FieldType::Short => "short",
            FieldType::Byte => "byte",
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::ScaledFloat => "scaled_float",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
            FieldType::Completion => "completion",
            FieldType::Other => "other",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mapping_tags() {
        let ty: FieldType = serde_json::from_str("\"keyword\"").unwrap();
        assert_eq!(ty, FieldType::Keyword);

        let ty: FieldType = serde_json::from_str("\"scaled_float\"").unwrap();
        assert_eq!(ty, FieldType::ScaledFloat);

        // Unknown tags must not reject the whole mapping
        let ty: FieldType = serde_json::from_str("\"geo_point\"").unwrap();
        assert_eq!(ty, FieldType::Other);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldType::Date.to_string(), "date");
        assert_eq!(FieldType::Keyword.to_string(), "keyword");
    }
}
