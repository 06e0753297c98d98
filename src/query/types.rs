//! Core types for the query system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator for combining terms in a match query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOperator {
    /// All terms must match (AND)
    And,
    /// At least one term must match (OR)
    #[default]
    Or,
}

impl MatchOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOperator::And => "and",
            MatchOperator::Or => "or",
        }
    }
}

/// How a multi_match query combines per-field scores
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    /// Score of the single best matching field
    #[default]
    BestFields,
    /// Sum of the scores of all matching fields
    MostFields,
    /// Treat the fields as one combined field
    CrossFields,
    Phrase,
    PhrasePrefix,
}

/// How a function_score result is combined with the query score
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostMode {
    #[default]
    Multiply,
    Replace,
    Sum,
    Avg,
    Max,
    Min,
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Recognize a sort order token, `None` for anything else
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// How multi-valued fields are reduced to a single sort value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Min,
    Max,
    Sum,
    Avg,
    Median,
}

impl SortMode {
    /// Recognize a sort mode token, `None` for anything else
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "min" => Some(SortMode::Min),
            "max" => Some(SortMode::Max),
            "sum" => Some(SortMode::Sum),
            "avg" => Some(SortMode::Avg),
            "median" => Some(SortMode::Median),
            _ => None,
        }
    }
}

/// Value type for range queries
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    /// 64-bit integer
    Long(i64),
    /// 64-bit floating point
    Double(f64),
    /// String (for dates, keywords)
    String(String),
}

impl From<&str> for RangeValue {
    fn from(value: &str) -> Self {
        RangeValue::String(value.to_string())
    }
}

impl From<String> for RangeValue {
    fn from(value: String) -> Self {
        RangeValue::String(value)
    }
}

impl From<i64> for RangeValue {
    fn from(value: i64) -> Self {
        RangeValue::Long(value)
    }
}

/// Range bounds for range queries
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Greater than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<RangeValue>,
    /// Greater than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<RangeValue>,
    /// Less than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<RangeValue>,
    /// Less than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<RangeValue>,
}

impl RangeBounds {
    /// True when no bound is set
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.gt.is_none() && self.lte.is_none() && self.lt.is_none()
    }
}

/// Minimum should match configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Exact count
    Count(usize),
    /// Percentage (e.g., "75%")
    Percentage(String),
}

impl Default for MinimumShouldMatch {
    fn default() -> Self {
        MinimumShouldMatch::Count(1)
    }
}

/// A field name with a relevance multiplier, written `field^boost` in the DSL
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldBoost {
    pub field: String,
    pub boost: f64,
}

impl FieldBoost {
    pub fn new(field: impl Into<String>, boost: f64) -> Self {
        Self {
            field: field.into(),
            boost,
        }
    }

    /// The weighted field table used for free-text repository search
    ///
    /// Keyword sub-fields outrank their analyzed counterparts so exact names
    /// float to the top.
    pub fn default_full_text_fields() -> Vec<FieldBoost> {
        [
            ("name", 5.0),
            ("name.keyword", 10.0),
            ("description", 2.0),
            ("agency.acronym", 1.0),
            ("agency.name", 1.0),
            ("agency.name.keyword", 5.0),
            ("permissions.usageType", 1.0),
            ("tags", 3.0),
            ("tags.keyword", 3.0),
            ("languages", 1.0),
            ("languages.keyword", 3.0),
        ]
        .into_iter()
        .map(|(field, boost)| FieldBoost::new(field, boost))
        .collect()
    }
}

impl fmt::Display for FieldBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.boost == 1.0 {
            write!(f, "{}", self.field)
        } else {
            write!(f, "{}^{}", self.field, self.boost)
        }
    }
}

impl FromStr for FieldBoost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, boost) = match s.rsplit_once('^') {
            Some((field, boost)) => {
                let boost: f64 = boost
                    .parse()
                    .map_err(|_| format!("Invalid boost in field '{}'", s))?;
                (field, boost)
            }
            None => (s, 1.0),
        };

        if field.is_empty() {
            return Err(format!("Missing field name in '{}'", s));
        }
        if !boost.is_finite() || boost < 0.0 {
            return Err(format!("Boost must be a non-negative number in '{}'", s));
        }
        Ok(FieldBoost::new(field, boost))
    }
}

impl TryFrom<String> for FieldBoost {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldBoost> for String {
    fn from(value: FieldBoost) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_tokens() {
        assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("DESC"), None);
        assert_eq!(SortMode::parse("median"), Some(SortMode::Median));
        assert_eq!(SortMode::parse("asc"), None);
    }

    #[test]
    fn test_field_boost_display() {
        assert_eq!(FieldBoost::new("name", 5.0).to_string(), "name^5");
        assert_eq!(FieldBoost::new("agency.name", 1.0).to_string(), "agency.name");
        assert_eq!(FieldBoost::new("tags", 2.5).to_string(), "tags^2.5");
    }

    #[test]
    fn test_field_boost_parse() {
        assert_eq!(
            "name.keyword^10".parse::<FieldBoost>().unwrap(),
            FieldBoost::new("name.keyword", 10.0)
        );
        assert_eq!(
            "languages".parse::<FieldBoost>().unwrap(),
            FieldBoost::new("languages", 1.0)
        );
        assert!("name^high".parse::<FieldBoost>().is_err());
        assert!("^3".parse::<FieldBoost>().is_err());
        assert!("name^-1".parse::<FieldBoost>().is_err());
    }

    #[test]
    fn test_default_full_text_fields() {
        let fields = FieldBoost::default_full_text_fields();
        assert_eq!(fields.len(), 11);

        let name = fields.iter().find(|f| f.field == "name").unwrap();
        let name_keyword = fields.iter().find(|f| f.field == "name.keyword").unwrap();
        assert!(name_keyword.boost > name.boost);

        let top = fields
            .iter()
            .max_by(|a, b| a.boost.total_cmp(&b.boost))
            .unwrap();
        assert_eq!(top.field, "name.keyword");
    }

    #[test]
    fn test_range_bounds_serialization() {
        let bounds = RangeBounds {
            gte: Some("2017-01-01".into()),
            lte: Some(RangeValue::Long(10)),
            ..Default::default()
        };
        let json = serde_json::to_value(&bounds).unwrap();
        assert_eq!(json, serde_json::json!({ "gte": "2017-01-01", "lte": 10 }));
        assert!(RangeBounds::default().is_empty());
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_value(MultiMatchType::BestFields).unwrap(),
            "best_fields"
        );
        assert_eq!(serde_json::to_value(BoostMode::Multiply).unwrap(), "multiply");
        assert_eq!(
            serde_json::to_value(MinimumShouldMatch::default()).unwrap(),
            1
        );
    }
}
