use serde::{Deserialize, Serialize};

/// A transcript after lower-casing, punctuation stripping and sentence splitting.
///
/// Segment order is the order of the transcript; extractors rely on it for
/// first-match-wins semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTranscript {
    /// Cleaned full text before splitting
    pub text: String,
    /// Non-empty, trimmed sentence-like segments
    pub segments: Vec<String>,
}

impl NormalizedTranscript {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Trait for turning a raw transcript into ordered segments
pub trait Normalizer {
    fn normalize(&self, transcript: &str) -> NormalizedTranscript;
}

/// Default normalizer used by the voice note parser
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, transcript: &str) -> NormalizedTranscript {
        let text = clean_text(transcript);
        let segments = split_segments(&text);
        tracing::debug!(segments = segments.len(), "Normalized transcript");
        NormalizedTranscript { text, segments }
    }
}

/// Lower-case and strip punctuation.
///
/// Keeps alphanumerics, whitespace, `@`, `.`, `-` and `_`. A `$` directly
/// before a digit and a `,` or `/` between two digits also survive so that
/// amounts like `$75,000` and dates like `10/15` stay matchable.
pub fn clean_text(transcript: &str) -> String {
    let chars: Vec<char> = transcript.to_lowercase().chars().collect();
    let mut out = String::with_capacity(chars.len());

    for (i, &c) in chars.iter().enumerate() {
        let prev = if i > 0 { chars.get(i - 1).copied() } else { None };
        let next = chars.get(i + 1).copied();
        let digit_before = prev.is_some_and(|p| p.is_ascii_digit());
        let digit_after = next.is_some_and(|n| n.is_ascii_digit());

        let keep = match c {
            '@' | '.' | '-' | '_' => true,
            '$' => digit_after,
            ',' | '/' => digit_before && digit_after,
            c => c.is_alphanumeric() || c.is_whitespace(),
        };
        if keep {
            out.push(c);
        }
    }

    out
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split cleaned text on runs of `.`, `!` and `?`.
///
/// A lone `.` with non-whitespace on both sides (an email domain, a decimal
/// amount) is part of the word, not a sentence end.
pub fn split_segments(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        if !is_terminator(chars[i]) {
            current.push(chars[i]);
            i += 1;
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_terminator(chars[i]) {
            i += 1;
        }

        let inner_dot = i - run_start == 1
            && chars[run_start] == '.'
            && run_start > 0
            && !chars[run_start - 1].is_whitespace()
            && i < chars.len()
            && !chars[i].is_whitespace();

        if inner_dot {
            current.push('.');
        } else {
            push_segment(&mut segments, &mut current);
        }
    }
    push_segment(&mut segments, &mut current);

    segments
}

fn push_segment(segments: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
    current.clear();
}

/// Convenience wrapper around [`DefaultNormalizer`]
pub fn normalize(transcript: &str) -> Vec<String> {
    DefaultNormalizer.normalize(transcript).segments
}
