use crate::models::{FilterSpec, Record};

/// Case-insensitive containment / 不区分大小写的包含判断
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a single record satisfies every populated field of `spec`
pub fn matches(spec: &FilterSpec, record: &Record) -> bool {
    let props = &record.properties;

    if let Some(want) = spec.is_palindrome {
        if props.is_palindrome != want {
            return false;
        }
    }
    if let Some(min) = spec.min_length {
        if props.length < min {
            return false;
        }
    }
    if let Some(max) = spec.max_length {
        if props.length > max {
            return false;
        }
    }
    if let Some(count) = spec.word_count {
        if props.word_count != count {
            return false;
        }
    }
    if let Some(c) = spec.contains_character {
        let mut buf = [0u8; 4];
        if !contains_ignore_case(&record.value, c.encode_utf8(&mut buf)) {
            return false;
        }
    }
    if let Some(ref sub) = spec.contains_substring {
        if !contains_ignore_case(&record.value, sub) {
            return false;
        }
    }
    true
}

/// Keep the records matching `spec`, in their original order
pub fn apply<I>(spec: &FilterSpec, records: I) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    records.into_iter().filter(|r| matches(spec, r)).collect()
}
