//! Interaction extraction: type, key points, next steps, follow-up date, summary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{NO_KEY_POINTS_PLACEHOLDER, NO_NEXT_STEPS_PLACEHOLDER, SUMMARY_SEGMENTS};
use crate::pipeline::processing::patterns::{
    capitalize_first, collapse_whitespace, compile_all, contains_any, first_capture, phrase_alternation,
};
use crate::types::{InteractionRecord, InteractionType};

/// Classification order is significant: the first type whose keywords hit wins.
const TYPE_KEYWORDS: &[(InteractionType, &[&str])] = &[
    (
        InteractionType::Meeting,
        &["met", "meeting", "visited", "sat down", "discussed in person", "in person"],
    ),
    (
        InteractionType::Call,
        &["called", "call", "phone call", "spoke", "conversation", "talked"],
    ),
    (
        InteractionType::Demo,
        &["demo", "demonstration", "showed", "presentation", "walkthrough"],
    ),
    (InteractionType::Email, &["emailed", "email", "message", "sent"]),
];

const KEY_POINT_INDICATORS: &[&str] = &[
    "they mentioned",
    "key point",
    "key points",
    "important",
    "noted",
    "discussed",
    "highlighted",
    "brought up",
    "interested in",
    "concerned about",
];

const NEXT_STEP_INDICATORS: &[&str] = &[
    "next step",
    "next steps",
    "follow up",
    "follow-up",
    "will",
    "need to",
    "needs to",
    "schedule",
    "send",
    "prepare",
    "action item",
    "action items",
    "to do",
];

/// Residual text must be longer than this to count as a point or step
const MIN_ITEM_CHARS: usize = 5;

const DATE_TRIGGER: &str = r"\b(?:follow up|follow-up|next|schedule|scheduled)\s+(?:(?:on|in|at|for)\s+)?";

static FOLLOW_UP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let month_day = format!(
        r"{}((?:{})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:\s+\d{{4}})?)\b",
        DATE_TRIGGER,
        super::MONTH_NAMES
    );
    let slash_date = format!(r"{}(\d{{1,2}}/\d{{1,2}}(?:/\d{{2,4}})?)\b", DATE_TRIGGER);
    let weekday = format!(
        r"{}(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        DATE_TRIGGER
    );
    compile_all(&[month_day.as_str(), slash_date.as_str(), weekday.as_str()])
});

static KEY_POINT_STRIPPER: Lazy<Option<Regex>> = Lazy::new(|| phrase_alternation(KEY_POINT_INDICATORS));
static NEXT_STEP_STRIPPER: Lazy<Option<Regex>> = Lazy::new(|| phrase_alternation(NEXT_STEP_INDICATORS));

/// Interaction record plus whether each list had real content before placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionExtraction {
    pub record: InteractionRecord,
    pub key_points_found: bool,
    pub next_steps_found: bool,
}

#[derive(Debug, Default)]
struct InteractionBuilder {
    kind: Option<InteractionType>,
    key_points: Vec<String>,
    next_steps: Vec<String>,
    follow_up_date: Option<String>,
}

impl InteractionBuilder {
    fn observe(&mut self, segment: &str) {
        if self.kind.is_none() {
            self.kind = classify_segment(segment);
        }

        if contains_any(segment, KEY_POINT_INDICATORS) {
            if let Some(point) = strip_indicators(&KEY_POINT_STRIPPER, segment) {
                self.key_points.push(point);
            }
        }

        if contains_any(segment, NEXT_STEP_INDICATORS) {
            if let Some(step) = strip_indicators(&NEXT_STEP_STRIPPER, segment) {
                self.next_steps.push(step);
            }
        }

        if self.follow_up_date.is_none() {
            self.follow_up_date = first_capture(&FOLLOW_UP_PATTERNS, segment);
        }
    }

    fn build(self, summary: String) -> InteractionExtraction {
        let key_points_found = !self.key_points.is_empty();
        let next_steps_found = !self.next_steps.is_empty();

        let key_points = if key_points_found {
            self.key_points
        } else {
            vec![NO_KEY_POINTS_PLACEHOLDER.to_string()]
        };
        let next_steps = if next_steps_found {
            self.next_steps
        } else {
            vec![NO_NEXT_STEPS_PLACEHOLDER.to_string()]
        };

        InteractionExtraction {
            record: InteractionRecord {
                kind: self.kind.unwrap_or_default(),
                summary,
                key_points,
                next_steps,
                follow_up_date: self.follow_up_date,
            },
            key_points_found,
            next_steps_found,
        }
    }
}

/// Type of the first keyword hit in this segment, checked in classification order.
fn classify_segment(segment: &str) -> Option<InteractionType> {
    TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(segment, keywords))
        .map(|(kind, _)| *kind)
}

fn strip_indicators(stripper: &Option<Regex>, segment: &str) -> Option<String> {
    let stripped = match stripper {
        Some(re) => re.replace_all(segment, " ").into_owned(),
        None => segment.to_string(),
    };
    let residual = collapse_whitespace(&stripped);
    (residual.chars().count() > MIN_ITEM_CHARS).then(|| capitalize_first(&residual))
}

/// First segments joined into a sentence list, always ending in a period.
pub fn build_summary(segments: &[String]) -> String {
    let head: Vec<&str> = segments.iter().take(SUMMARY_SEGMENTS).map(String::as_str).collect();
    format!("{}.", head.join(". "))
}

/// Extract the interaction from normalized segments.
pub fn extract_interaction(segments: &[String]) -> InteractionExtraction {
    let mut builder = InteractionBuilder::default();
    for segment in segments {
        builder.observe(segment);
    }

    let extraction = builder.build(build_summary(segments));
    tracing::debug!(
        kind = %extraction.record.kind,
        key_points = extraction.record.key_points.len(),
        next_steps = extraction.record.next_steps.len(),
        follow_up = extraction.record.follow_up_date.is_some(),
        "Interaction extraction finished"
    );
    extraction
}
