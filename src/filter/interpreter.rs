//! Natural-language query interpreter / 自然语言查询解析
//!
//! Deterministic keyword rules, not NLP. Each rule may fire on its own and
//! all fired rules are combined into one FilterSpec. Rules are scanned in
//! declaration order and, within a rule, left to right, so the last match
//! for a field wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseFailure;
use crate::models::FilterSpec;

static PALINDROME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bpalindrom(?:e|es|ic)\b").expect("valid regex"));

static SINGLE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:single|one)[\s-]+word").expect("valid regex"));

static LONGER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blonger\s+than\s+([0-9]+)\b").expect("valid regex"));

static SHORTER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bshorter\s+than\s+([0-9]+)\b").expect("valid regex"));

static CONTAINS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:contain(?:s|ing)?\s+(?:the\s+)?(?:(?:letter|character)\s+)?|with\s+(?:the\s+)?(?:letter|character)\s+)([\p{L}\p{N}]+)",
    )
    .expect("valid regex")
});

/// Right-most numeric capture of `re` in `query`
fn last_number(re: &Regex, query: &str) -> Result<Option<usize>, ParseFailure> {
    match re.captures_iter(query).last() {
        Some(caps) => {
            let digits = &caps[1];
            digits
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseFailure::NumberOutOfRange(digits.to_string()))
        }
        None => Ok(None),
    }
}

/// Lowercase and trim a query before matching
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Translate a free-text query into a FilterSpec
pub fn interpret(query: &str) -> Result<FilterSpec, ParseFailure> {
    let query = normalize_query(query);
    if query.is_empty() {
        return Err(ParseFailure::MissingQuery);
    }

    let mut spec = FilterSpec::default();

    if PALINDROME.is_match(&query) {
        spec.is_palindrome = Some(true);
    }

    if SINGLE_WORD.is_match(&query) {
        spec.word_count = Some(1);
    }

    if let Some(n) = last_number(&LONGER_THAN, &query)? {
        let min = n
            .checked_add(1)
            .ok_or_else(|| ParseFailure::NumberOutOfRange(n.to_string()))?;
        spec.min_length = Some(min);
    }

    if let Some(n) = last_number(&SHORTER_THAN, &query)? {
        let max = n
            .checked_sub(1)
            .ok_or_else(|| ParseFailure::Unsatisfiable(format!("shorter than {}", n)))?;
        spec.max_length = Some(max);
    }

    for caps in CONTAINS.captures_iter(&query) {
        let token = &caps[1];
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => spec.contains_character = Some(c),
            // Lone digits and symbols are not letters to search for
            (Some(_), None) => {}
            _ => spec.contains_substring = Some(token.to_string()),
        }
    }

    if spec.is_empty() {
        return Err(ParseFailure::Unrecognized);
    }

    tracing::debug!("Interpreted query {:?} as {:?}", query, spec);
    Ok(spec)
}
