use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::QueryError;
use crate::query::FieldBoost;
use crate::Result;

/// Result window defaults and hard cap for one query variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl PageLimits {
    pub const fn new(default_size: u64, max_size: u64) -> Self {
        Self {
            default_size,
            max_size,
        }
    }

    /// Apply the default and the cap to a requested size
    pub fn clamp(&self, requested: Option<u64>) -> u64 {
        requested.unwrap_or(self.default_size).min(self.max_size)
    }

    fn validate(&self, scope: &str) -> Result<()> {
        if self.max_size == 0 {
            return Err(QueryError::InvalidSettings(format!(
                "{}.max_size must be greater than zero",
                scope
            )));
        }
        if self.default_size > self.max_size {
            return Err(QueryError::InvalidSettings(format!(
                "{}.default_size ({}) exceeds max_size ({})",
                scope, self.default_size, self.max_size
            )));
        }
        Ok(())
    }
}

/// Entity (repository) search configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySearchSettings {
    pub page: PageLimits,
    /// Weighted fields the free-text term is matched against
    pub full_text_fields: Vec<FieldBoost>,
    /// Secondary sort applied after relevance
    pub tie_break_field: String,
    /// Sub-field user sorts are run against
    pub sort_subfield: String,
}

impl Default for EntitySearchSettings {
    fn default() -> Self {
        Self {
            page: PageLimits::new(10, 10_000),
            full_text_fields: FieldBoost::default_full_text_fields(),
            tie_break_field: "score".to_string(),
            sort_subfield: "keyword".to_string(),
        }
    }
}

impl EntitySearchSettings {
    /// Replace the weighted full-text field table
    pub fn with_full_text_fields(mut self, fields: Vec<FieldBoost>) -> Self {
        self.full_text_fields = fields;
        self
    }

    /// Set the result window limits
    pub fn with_page_limits(mut self, page: PageLimits) -> Self {
        self.page = page;
        self
    }
}

/// Terms-suggestion search configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermsSettings {
    pub page: PageLimits,
    /// Analyzed field the suggestion text is matched against
    pub suggest_field: String,
    /// Raw term field used to boost exact matches
    pub exact_field: String,
    /// Keyword field holding the term category
    pub term_type_field: String,
    /// Categories searched when the caller does not pick any
    pub default_term_types: Vec<String>,
    /// Numeric field that scales relevance by term frequency
    pub frequency_field: String,
    pub frequency_factor: f64,
}

impl Default for TermsSettings {
    fn default() -> Self {
        Self {
            page: PageLimits::new(5, 100),
            suggest_field: "term_suggest".to_string(),
            exact_field: "term".to_string(),
            term_type_field: "term_type".to_string(),
            default_term_types: vec![
                "name".to_string(),
                "agency.name".to_string(),
                "agency.acronym".to_string(),
                "tags".to_string(),
                "languages".to_string(),
            ],
            frequency_field: "count_normalized".to_string(),
            frequency_factor: 0.25,
        }
    }
}

impl TermsSettings {
    /// Set the default term categories
    pub fn with_default_term_types<I, S>(mut self, term_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_term_types = term_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the result window limits
    pub fn with_page_limits(mut self, page: PageLimits) -> Self {
        self.page = page;
        self
    }
}

/// Top-level settings for both compilers and the response sanitizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub entity: EntitySearchSettings,
    pub terms: TermsSettings,
    /// Keys starting with this character are stripped from results
    pub private_prefix: char,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            entity: EntitySearchSettings::default(),
            terms: TermsSettings::default(),
            private_prefix: '_',
        }
    }
}

impl SearchSettings {
    /// Load settings from a JSON file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: SearchSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for values no query could be built from
    pub fn validate(&self) -> Result<()> {
        self.entity.page.validate("entity.page")?;
        self.terms.page.validate("terms.page")?;

        if self.entity.full_text_fields.is_empty() {
            return Err(QueryError::InvalidSettings(
                "entity.full_text_fields must not be empty".to_string(),
            ));
        }
        if self.terms.suggest_field.is_empty() {
            return Err(QueryError::InvalidSettings(
                "terms.suggest_field must not be empty".to_string(),
            ));
        }
        if !self.terms.frequency_factor.is_finite() || self.terms.frequency_factor <= 0.0 {
            return Err(QueryError::InvalidSettings(format!(
                "terms.frequency_factor must be a positive number, got {}",
                self.terms.frequency_factor
            )));
        }
        Ok(())
    }

    /// Replace the entity search settings
    pub fn with_entity(mut self, entity: EntitySearchSettings) -> Self {
        self.entity = entity;
        self
    }

    /// Replace the terms search settings
    pub fn with_terms(mut self, terms: TermsSettings) -> Self {
        self.terms = terms;
        self
    }
}
