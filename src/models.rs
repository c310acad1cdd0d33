use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived measurements of a string / 字符串属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    /// SHA-256 of the trimmed value, doubles as the record id
    #[serde(rename = "sha256_hash")]
    pub content_hash: String,
    #[serde(rename = "character_frequency_map")]
    pub character_frequency: BTreeMap<char, usize>,
}

/// Stored string / 已存储的字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub value: String,
    pub properties: Properties,
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Build a record from a raw value. The id and properties always come
    /// from the same analysis pass.
    pub fn new(value: String, created_at: DateTime<Utc>) -> Self {
        let properties = crate::analyzer::analyze(&value);
        Self {
            id: properties.content_hash.clone(),
            value,
            properties,
            created_at,
        }
    }
}

/// Structured predicate over records; `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_substring: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query string of GET /strings. Values stay raw so that bad input is
/// reported per parameter instead of as a generic rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStringsParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
    pub contains: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NaturalLanguageParams {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListStringsResponse {
    pub data: Vec<Record>,
    pub count: usize,
    pub filters_applied: FilterSpec,
}

/// Echo of a natural-language query and the filters derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<Record>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}
