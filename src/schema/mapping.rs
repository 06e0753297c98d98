//! Index mapping definitions
//!
//! Deserializes the Elasticsearch mapping document the index was created with.
//! Only the parts that influence query construction are modelled; any other
//! mapping parameters are accepted and ignored.

use super::field_type::FieldType;
use crate::error::QueryError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Field mapping configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Declared field type (absent for plain objects)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    /// Nested field mappings (for object types)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, FieldMapping>>,

    /// Multi-fields indexing the same value differently (e.g. `name.keyword`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldMapping>>,

    /// Date format, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldMapping {
    /// Create a new field mapping with the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Default::default()
        }
    }

    /// Create a text field mapping
    pub fn text() -> Self {
        Self::new(FieldType::Text)
    }

    /// Create a keyword field mapping
    pub fn keyword() -> Self {
        Self::new(FieldType::Keyword)
    }

    /// Create a date field mapping
    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    /// Create an untyped object mapping holding the given properties
    pub fn object(properties: BTreeMap<String, FieldMapping>) -> Self {
        Self {
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// Add a `keyword` multi-field under this field
    pub fn with_keyword_subfield(mut self) -> Self {
        self.fields
            .get_or_insert_with(BTreeMap::new)
            .insert("keyword".to_string(), FieldMapping::keyword());
        self
    }

    /// Set nested field properties (for object types)
    pub fn with_properties(mut self, properties: BTreeMap<String, FieldMapping>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Type of this field, treating untyped mappings with properties as objects
    pub fn effective_type(&self) -> FieldType {
        match self.field_type {
            Some(ty) => ty,
            None if self.properties.is_some() => FieldType::Object,
            None => FieldType::Other,
        }
    }

    /// Name of the first keyword-typed multi-field, if any
    pub fn keyword_subfield(&self) -> Option<&str> {
        self.fields.as_ref().and_then(|fields| {
            fields
                .iter()
                .find(|(_, mapping)| mapping.field_type == Some(FieldType::Keyword))
                .map(|(name, _)| name.as_str())
        })
    }
}

/// A mapped leaf or container field with its full dotted path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenedField {
    pub path: String,
    pub field_type: FieldType,
    /// Dotted path of the keyword multi-field, when one is declared
    pub keyword_path: Option<String>,
}

/// Index mapping (schema) definition
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMapping {
    /// Field mappings
    #[serde(default)]
    pub properties: BTreeMap<String, FieldMapping>,
}

impl IndexMapping {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field mapping
    pub fn field(mut self, name: impl Into<String>, mapping: FieldMapping) -> Self {
        self.properties.insert(name.into(), mapping);
        self
    }

    /// Build a mapping from a JSON document
    ///
    /// Accepts the bare `{ "properties": ... }` form, the `{ "mappings": ... }`
    /// form returned by the engine, and either of those nested under a
    /// document type key such as `"repo"`.
    pub fn from_json(value: &Value, doc_type: Option<&str>) -> Result<Self> {
        let mut root = value;
        if let Some(mappings) = root.get("mappings") {
            root = mappings;
        }
        if let Some(doc_type) = doc_type {
            root = root.get(doc_type).ok_or_else(|| {
                QueryError::InvalidMapping(format!("document type '{}' not found", doc_type))
            })?;
        }

        if !root.get("properties").map_or(false, Value::is_object) {
            return Err(QueryError::InvalidMapping(
                "mapping must contain a 'properties' object".to_string(),
            ));
        }

        Ok(serde_json::from_value(root.clone())?)
    }

    /// Load a mapping from a JSON file
    pub fn from_file(path: impl AsRef<Path>, doc_type: Option<&str>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)?;
        Self::from_json(&value, doc_type)
    }

    /// Get a field mapping by path (supports dot notation and multi-fields)
    pub fn get_field(&self, path: &str) -> Option<&FieldMapping> {
        let parts: Vec<&str> = path.split('.').collect();
        Self::get_nested_field_parts(&self.properties, &parts)
    }

    fn get_nested_field_parts<'a>(
        props: &'a BTreeMap<String, FieldMapping>,
        parts: &[&str],
    ) -> Option<&'a FieldMapping> {
        let (first, rest) = parts.split_first()?;
        let field = props.get(*first)?;

        if rest.is_empty() {
            return Some(field);
        }

        field
            .properties
            .as_ref()
            .and_then(|nested| Self::get_nested_field_parts(nested, rest))
            .or_else(|| {
                field
                    .fields
                    .as_ref()
                    .and_then(|multi| Self::get_nested_field_parts(multi, rest))
            })
    }

    /// Check if a field exists
    pub fn has_field(&self, path: &str) -> bool {
        self.get_field(path).is_some()
    }

    /// Get all field names (flattened with dot notation)
    pub fn field_names(&self) -> Vec<String> {
        self.flatten().into_iter().map(|field| field.path).collect()
    }

    /// Flatten the mapping into dotted paths, depth first in name order
    ///
    /// Multi-fields are not listed on their own; they are reported through
    /// `keyword_path` of the field that declares them.
    pub fn flatten(&self) -> Vec<FlattenedField> {
        let mut out = Vec::new();
        Self::collect_fields(&self.properties, "", &mut out);
        out
    }

    fn collect_fields(
        props: &BTreeMap<String, FieldMapping>,
        prefix: &str,
        out: &mut Vec<FlattenedField>,
    ) {
        for (name, mapping) in props {
            let full_name = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };

            out.push(FlattenedField {
                path: full_name.clone(),
                field_type: mapping.effective_type(),
                keyword_path: mapping
                    .keyword_subfield()
                    .map(|sub| format!("{}.{}", full_name, sub)),
            });

            if let Some(ref nested_props) = mapping.properties {
                Self::collect_fields(nested_props, &full_name, out);
            }
        }
    }
}
