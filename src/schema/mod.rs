//! Schema and field type system
//!
//! This module turns the index mapping into the read-only lookups the query
//! compilers need:
//! - Field types (Text, Keyword, Date, ...)
//! - Index mappings (as declared to the search engine)
//! - The field-type registry (fields grouped by declared type)

mod field_type;
mod mapping;
mod registry;

pub use field_type::FieldType;
pub use mapping::{FieldMapping, FlattenedField, IndexMapping};
pub use registry::FieldTypeRegistry;
