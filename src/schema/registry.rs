//! Field-type registry
//!
//! A read-only index from field path to declared type, built once from the
//! index mapping and shared by every compiler instance.

use super::field_type::FieldType;
use super::mapping::IndexMapping;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
struct FieldEntry {
    field_type: FieldType,
    keyword_path: Option<String>,
}

/// Lookup of mapped fields by name and by declared type
#[derive(Clone, Debug, Default)]
pub struct FieldTypeRegistry {
    fields: HashMap<String, FieldEntry>,
    by_type: BTreeMap<FieldType, Vec<String>>,
}

impl FieldTypeRegistry {
    /// Build the registry from an index mapping
    pub fn from_mapping(mapping: &IndexMapping) -> Self {
        let mut registry = Self::default();
        for field in mapping.flatten() {
            registry.insert(field.path, field.field_type, field.keyword_path);
        }
        registry
    }

    /// Register a single field
    ///
    /// Intended for assembling a registry by hand; fields keep insertion order
    /// within their type.
    pub fn with_field(mut self, path: impl Into<String>, field_type: FieldType) -> Self {
        self.insert(path.into(), field_type, None);
        self
    }

    /// Register a field that carries a `keyword` multi-field
    pub fn with_keyword_subfield(mut self, path: impl Into<String>, field_type: FieldType) -> Self {
        let path = path.into();
        let keyword_path = format!("{}.keyword", path);
        self.insert(path, field_type, Some(keyword_path));
        self
    }

    fn insert(&mut self, path: String, field_type: FieldType, keyword_path: Option<String>) {
        if let Some(previous) = self.fields.get(&path) {
            if let Some(names) = self.by_type.get_mut(&previous.field_type) {
                names.retain(|name| name != &path);
            }
        }
        self.by_type
            .entry(field_type)
            .or_default()
            .push(path.clone());
        self.fields.insert(
            path,
            FieldEntry {
                field_type,
                keyword_path,
            },
        );
    }

    /// Names of all fields declared with the given type
    pub fn fields_of_type(&self, field_type: FieldType) -> &[String] {
        self.by_type
            .get(&field_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Declared type of a field
    pub fn field_type(&self, path: &str) -> Option<FieldType> {
        self.fields.get(path).map(|entry| entry.field_type)
    }

    /// Path to run exact-match clauses against for a field
    ///
    /// This is the keyword multi-field when the mapping declares one and the
    /// field itself otherwise.
    pub fn exact_match_path<'a>(&'a self, path: &'a str) -> &'a str {
        self.fields
            .get(path)
            .and_then(|entry| entry.keyword_path.as_deref())
            .unwrap_or(path)
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&IndexMapping> for FieldTypeRegistry {
    fn from(mapping: &IndexMapping) -> Self {
        Self::from_mapping(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldMapping;

    #[test]
    fn test_fields_of_type() {
        let mut agency = BTreeMap::new();
        agency.insert("acronym".to_string(), FieldMapping::keyword());
        agency.insert("name".to_string(), FieldMapping::text().with_keyword_subfield());

        let mapping = IndexMapping::new()
            .field("status", FieldMapping::keyword())
            .field("agency", FieldMapping::object(agency))
            .field("updated", FieldMapping::date());

        let registry = FieldTypeRegistry::from_mapping(&mapping);

        assert_eq!(
            registry.fields_of_type(FieldType::Keyword),
            &["agency.acronym".to_string(), "status".to_string()]
        );
        assert_eq!(registry.fields_of_type(FieldType::Date), &["updated".to_string()]);
        assert!(registry.fields_of_type(FieldType::Boolean).is_empty());
        assert_eq!(registry.field_type("agency"), Some(FieldType::Object));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_exact_match_path() {
        let registry = FieldTypeRegistry::default()
            .with_field("status", FieldType::Keyword)
            .with_keyword_subfield("languages", FieldType::Keyword);

        assert_eq!(registry.exact_match_path("status"), "status");
        assert_eq!(registry.exact_match_path("languages"), "languages.keyword");
        assert_eq!(registry.exact_match_path("unmapped"), "unmapped");
    }

    #[test]
    fn test_reregister_moves_type() {
        let registry = FieldTypeRegistry::default()
            .with_field("status", FieldType::Text)
            .with_field("status", FieldType::Keyword);

        assert!(registry.fields_of_type(FieldType::Text).is_empty());
        assert_eq!(registry.fields_of_type(FieldType::Keyword), &["status".to_string()]);
        assert_eq!(registry.len(), 1);
    }
}
