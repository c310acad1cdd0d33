//! String analyzer / 字符串分析
//!
//! Pure, deterministic measurement of a string. Every measurement runs on
//! the trimmed value; the caller decides what to persist.

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

use crate::models::Properties;

/// Trim leading/trailing whitespace / 去除首尾空白
pub fn normalize(raw: &str) -> &str {
    raw.trim()
}

/// Hex SHA-256 of the normalized value, used as the record id
pub fn content_hash(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(raw).as_bytes());
    hex::encode(hasher.finalize())
}

/// Case-insensitive forward/backward comparison. Reverses before folding
/// case, so a letter whose lowercase spans several chars stays intact.
pub fn is_palindrome(value: &str) -> bool {
    let reversed: String = value.chars().rev().collect();
    value.to_lowercase() == reversed.to_lowercase()
}

/// Analyze a raw string. Total for every input, including "".
pub fn analyze(raw: &str) -> Properties {
    let value = normalize(raw);

    let mut character_frequency = BTreeMap::new();
    for c in value.chars() {
        *character_frequency.entry(c).or_insert(0) += 1;
    }
    let unique_characters = value.chars().collect::<HashSet<_>>().len();

    Properties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters,
        word_count: value.split_whitespace().count(),
        content_hash: content_hash(value),
        character_frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        let props = analyze("");
        assert_eq!(props.length, 0);
        assert_eq!(props.word_count, 0);
        assert_eq!(props.unique_characters, 0);
        assert!(props.is_palindrome);
        assert!(props.character_frequency.is_empty());
        // SHA-256 of the empty string
        assert_eq!(
            props.content_hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_palindrome_is_case_insensitive() {
        assert!(analyze("Racecar").is_palindrome);
        assert!(analyze("a").is_palindrome);
        assert!(!analyze("hello").is_palindrome);
        // Whitespace and punctuation are part of the comparison
        assert!(!analyze("A man a plan").is_palindrome);
        assert!(analyze("Step on no pets").is_palindrome);
    }

    #[test]
    fn test_palindrome_with_multi_char_lowercase() {
        // 'İ' lowercases to "i\u{307}"
        assert!(is_palindrome("İ"));
        assert!(is_palindrome("İxİ"));
        assert!(analyze("aİa").is_palindrome);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(analyze("a man a plan").word_count, 4);
        assert_eq!(analyze("  spaced\t\tout \n words  ").word_count, 3);
        assert_eq!(analyze("single").word_count, 1);
    }

    #[test]
    fn test_measurements_use_trimmed_value() {
        let padded = analyze("  abc  ");
        let bare = analyze("abc");
        assert_eq!(padded, bare);
        assert_eq!(padded.length, 3);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let props = analyze("héllo");
        assert_eq!(props.length, 5);
        assert_eq!(props.unique_characters, 4);
    }

    #[test]
    fn test_character_frequency_is_case_sensitive() {
        let props = analyze("Aa a");
        assert_eq!(props.character_frequency.get(&'A'), Some(&1));
        assert_eq!(props.character_frequency.get(&'a'), Some(&2));
        assert_eq!(props.character_frequency.get(&' '), Some(&1));
        assert_eq!(props.unique_characters, 3);
        let total: usize = props.character_frequency.values().sum();
        assert_eq!(total, props.length);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = analyze("The quick brown fox");
        let second = analyze("The quick brown fox");
        assert_eq!(first, second);
        assert_eq!(first.content_hash.len(), 64);
        assert_ne!(first.content_hash, analyze("the quick brown fox").content_hash);
    }
}
