//! Matching helpers shared by the extractors.
//!
//! Segments arrive lower-cased from the normalizer, so keyword checks are
//! plain string scans with word-boundary tests rather than regexes.

use regex::Regex;

/// Compile a prioritized pattern list, preserving priority order.
pub fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!("Skipping invalid extraction pattern '{}': {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Build one case-insensitive alternation matching any of `phrases` as whole words.
pub fn phrase_alternation(phrases: &[&str]) -> Option<Regex> {
    let body = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", body)).ok()
}

/// First capture group of the first pattern (in priority order) that matches.
pub fn first_capture(patterns: &[Regex], segment: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(segment)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Whether `phrase` occurs in `segment` delimited by non-word characters.
pub fn contains_phrase(segment: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    let mut search_from = 0;
    while let Some(offset) = segment[search_from..].find(phrase) {
        let start = search_from + offset;
        let end = start + phrase.len();

        let before_ok = segment[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
        let after_ok = segment[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }

        // Advance past the first char of this occurrence
        search_from = start + segment[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

pub fn contains_any(segment: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| contains_phrase(segment, phrase))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Upper-case the first letter of every whitespace-separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case only the first character.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_phrase_respects_word_boundaries() {
        assert!(contains_phrase("i had a call with sarah", "call"));
        assert!(contains_phrase("we will follow up", "follow up"));
        assert!(!contains_phrase("great news everyone", "new"));
        assert!(!contains_phrase("she is willing", "will"));
        assert!(contains_phrase("renewal and new terms", "new"));
    }

    #[test]
    fn test_contains_phrase_handles_multibyte_text() {
        assert!(contains_phrase("café meeting today", "meeting"));
        assert!(!contains_phrase("über", "ber"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sarah  johnson"), "Sarah Johnson");
        assert_eq!(title_case(""), "");
        assert_eq!(capitalize_first("pricing tiers"), "Pricing tiers");
    }

    #[test]
    fn test_first_capture_uses_priority_order() {
        let patterns = compile_all(&[r"budget (\d+)", r"(\d+)"]);
        assert_eq!(patterns.len(), 2);
        assert_eq!(first_capture(&patterns, "42 then budget 900").as_deref(), Some("900"));
        assert_eq!(first_capture(&patterns, "only 7").as_deref(), Some("7"));
        assert_eq!(first_capture(&patterns, "nothing"), None);
    }

    #[test]
    fn test_phrase_alternation_strips_all_phrases() {
        let re = phrase_alternation(&["key point", "noted"]).unwrap();
        let stripped = re.replace_all("key point we noted the budget", "");
        assert_eq!(collapse_whitespace(&stripped), "we the budget");
    }
}
