//! String service / 字符串服务
//!
//! The operations behind the HTTP routes: create, fetch, delete, explicit
//! filtering and natural-language filtering. Storage is injected.

use chrono::Utc;
use serde_json::Value;

use crate::analyzer;
use crate::error::{AppError, InputError, Result};
use crate::filter;
use crate::models::{FilterSpec, InterpretedQuery, ListStringsParams, Record};
use crate::store::SharedStore;

#[derive(Clone)]
pub struct StringService {
    store: SharedStore,
}

/// Extract the `value` field of a create request body
pub fn value_from_body(body: &Value) -> Result<String> {
    match body.get("value") {
        None | Some(Value::Null) => Err(InputError::Missing("value").into()),
        Some(Value::String(s)) if s.is_empty() => Err(InputError::Missing("value").into()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(InputError::WrongType("value").into()),
    }
}

fn parse_count(field: &'static str, raw: &str) -> std::result::Result<usize, InputError> {
    raw.trim().parse::<usize>().map_err(|_| InputError::Malformed {
        field,
        value: raw.to_string(),
    })
}

fn parse_bool(field: &'static str, raw: &str) -> std::result::Result<bool, InputError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(InputError::Malformed {
            field,
            value: raw.to_string(),
        }),
    }
}

/// An empty parameter (`?min_length=`) counts as absent
fn present(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|raw| !raw.is_empty())
}

/// Turn explicit query parameters into a FilterSpec. Bounds are inclusive.
pub fn filters_from_params(params: &ListStringsParams) -> Result<FilterSpec> {
    let mut spec = FilterSpec::default();

    if let Some(raw) = present(&params.is_palindrome) {
        spec.is_palindrome = Some(parse_bool("is_palindrome", raw)?);
    }
    if let Some(raw) = present(&params.min_length) {
        spec.min_length = Some(parse_count("min_length", raw)?);
    }
    if let Some(raw) = present(&params.max_length) {
        spec.max_length = Some(parse_count("max_length", raw)?);
    }
    if let Some(raw) = present(&params.word_count) {
        spec.word_count = Some(parse_count("word_count", raw)?);
    }
    if let Some(raw) = present(&params.contains_character) {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => spec.contains_character = Some(c),
            _ => {
                return Err(InputError::Malformed {
                    field: "contains_character",
                    value: raw.to_string(),
                }
                .into())
            }
        }
    }
    if let Some(raw) = present(&params.contains) {
        spec.contains_substring = Some(raw.to_string());
    }

    Ok(spec)
}

impl StringService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Analyze and store a new value; duplicates are rejected
    pub async fn create(&self, value: String) -> Result<Record> {
        if value.is_empty() {
            return Err(InputError::Missing("value").into());
        }
        let record = Record::new(value, Utc::now());
        self.store.insert(record.clone()).await?;
        tracing::info!("String stored: {}", record.id);
        Ok(record)
    }

    /// Look up by the id derived from `value`
    pub async fn fetch(&self, value: &str) -> Result<Record> {
        let id = analyzer::content_hash(value);
        self.store.get(&id).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, value: &str) -> Result<()> {
        let id = analyzer::content_hash(value);
        if self.store.delete(&id).await? {
            tracing::info!("String deleted: {}", id);
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    pub async fn list(&self, spec: &FilterSpec) -> Result<Vec<Record>> {
        Ok(self.store.scan(spec).await?)
    }

    /// Interpret `query` and run the derived filters
    pub async fn query_natural(&self, query: &str) -> Result<(Vec<Record>, InterpretedQuery)> {
        let spec = filter::interpret(query)?;
        let records = self.store.scan(&spec).await?;
        let interpreted = InterpretedQuery {
            original: filter::interpreter::normalize_query(query),
            parsed_filters: spec,
        };
        Ok((records, interpreted))
    }
}
