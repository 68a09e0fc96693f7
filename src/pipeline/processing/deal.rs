//! Deal extraction: stage, value, close date, description.
//!
//! A deal only exists when the transcript mentions an amount or moves the
//! stage past prospecting.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{DEAL_NAME_DATE_FORMAT, DEAL_NAME_PREFIX, MAX_DESCRIPTION_SEGMENTS};
use crate::pipeline::processing::patterns::{compile_all, contains_any, first_capture};
use crate::types::{DealRecord, DealStage};

const STAGE_KEYWORDS: &[(DealStage, &[&str])] = &[
    (DealStage::Prospecting, &["prospecting", "new", "initial", "first contact"]),
    (
        DealStage::Qualification,
        &["qualified", "interested", "potential", "opportunity"],
    ),
    (DealStage::Proposal, &["proposal", "quote", "quotation", "sent proposal"]),
    (
        DealStage::Negotiation,
        &["negotiating", "negotiation", "terms", "contract", "finalizing"],
    ),
    (DealStage::ClosedWon, &["won", "closed", "signed", "deal closed"]),
    (DealStage::ClosedLost, &["lost", "declined", "not interested", "passed"]),
];

const AMOUNT: &str = r"((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?)";

static VALUE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let dollar_sign = format!(r"\${}", AMOUNT);
    let after_keyword = format!(
        r"\b(?:worth|value|price|cost|budget)(?:\s+(?:is|of|at|around|about|approximately|roughly))*\s+\$?{}",
        AMOUNT
    );
    let before_currency = format!(r"\b{}\s*(?:dollars|usd)\b", AMOUNT);
    compile_all(&[dollar_sign.as_str(), after_keyword.as_str(), before_currency.as_str()])
});

static CLOSE_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let trigger = r"\b(?:close|closing|closes|expected|deadline)(?:\s+(?:by|on|date|is))*\s+";
    let month_day = format!(
        r"{}((?:{})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:\s+\d{{4}})?)\b",
        trigger,
        super::MONTH_NAMES
    );
    let slash_date = format!(r"{}(\d{{1,2}}/\d{{1,2}}(?:/\d{{2,4}})?)\b", trigger);
    compile_all(&[month_day.as_str(), slash_date.as_str()])
});

/// Segments must be longer than this to describe the deal
const MIN_DESCRIPTION_CHARS: usize = 10;

#[derive(Debug, Default)]
struct DealBuilder {
    stage: DealStage,
    value: Option<String>,
    close_date: Option<String>,
}

impl DealBuilder {
    fn observe(&mut self, segment: &str) {
        // Stage only ever moves away from prospecting once
        if self.stage == DealStage::Prospecting {
            if let Some(stage) = classify_stage(segment) {
                self.stage = stage;
            }
        }

        if self.value.is_none() {
            self.value = first_capture(&VALUE_PATTERNS, segment);
        }

        if self.close_date.is_none() {
            self.close_date = first_capture(&CLOSE_DATE_PATTERNS, segment);
        }
    }

    fn has_deal(&self) -> bool {
        self.value.is_some() || self.stage != DealStage::Prospecting
    }

    fn build(self, description: String, as_of: NaiveDate) -> Option<DealRecord> {
        if !self.has_deal() {
            return None;
        }

        Some(DealRecord {
            name: deal_name(as_of),
            value: self.value.unwrap_or_default(),
            stage: self.stage,
            close_date: self.close_date,
            description,
        })
    }
}

fn classify_stage(segment: &str) -> Option<DealStage> {
    STAGE_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(segment, keywords))
        .map(|(stage, _)| *stage)
}

/// "Deal - Oct 2026" style name stamped with the caller's local date.
pub fn deal_name(as_of: NaiveDate) -> String {
    format!("{}{}", DEAL_NAME_PREFIX, as_of.format(DEAL_NAME_DATE_FORMAT))
}

/// Discussion segments joined into a short description.
pub fn build_description(segments: &[String]) -> String {
    segments
        .iter()
        .filter(|s| s.chars().count() > MIN_DESCRIPTION_CHARS)
        .filter(|s| !s.contains("next step") && !s.contains("follow up"))
        .take(MAX_DESCRIPTION_SEGMENTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(". ")
}

/// Extract a deal from normalized segments, or `None` when nothing indicates one.
pub fn extract_deal(segments: &[String], as_of: NaiveDate) -> Option<DealRecord> {
    let mut builder = DealBuilder::default();
    for segment in segments {
        builder.observe(segment);
    }

    tracing::debug!(
        stage = %builder.stage,
        value_found = builder.value.is_some(),
        close_date_found = builder.close_date.is_some(),
        "Deal extraction finished"
    );

    builder.build(build_description(segments), as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::normalize::normalize;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn extract(transcript: &str) -> Option<DealRecord> {
        extract_deal(&normalize(transcript), as_of())
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(VALUE_PATTERNS.len(), 3);
        assert_eq!(CLOSE_DATE_PATTERNS.len(), 2);
    }

    #[test]
    fn test_dollar_amount_creates_deal() {
        let deal = extract("The potential deal value is around $75,000.").unwrap();
        assert_eq!(deal.value, "75,000");
        assert_eq!(deal.stage, DealStage::Qualification);
        assert_eq!(deal.name, "Deal - Oct 2026");
    }

    #[test]
    fn test_deal_name_format() {
        assert_eq!(deal_name(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()), "Deal - Jan 2026");
        assert_eq!(deal_name(NaiveDate::from_ymd_opt(2027, 12, 1).unwrap()), "Deal - Dec 2027");
    }

    #[test]
    fn test_value_after_keyword_and_before_currency() {
        assert_eq!(extract("Their budget is 50000 for this.").unwrap().value, "50000");
        assert_eq!(extract("Roughly 12,500 dollars in total.").unwrap().value, "12,500");
        assert_eq!(extract("Price of $99.50 per seat.").unwrap().value, "99.50");
    }

    #[test]
    fn test_no_value_and_prospecting_means_no_deal() {
        assert!(extract("Met with John from Acme. Discussed pricing.").is_none());
        assert!(extract("First contact with a new lead.").is_none());
    }

    #[test]
    fn test_stage_without_value_creates_deal() {
        let deal = extract("Great news! We signed the contract.").unwrap();
        assert_eq!(deal.stage, DealStage::Negotiation);
        assert_eq!(deal.value, "");
    }

    #[test]
    fn test_stage_moves_once() {
        let deal = extract("This is a new account. We sent a quote. They declined.").unwrap();
        assert_eq!(deal.stage, DealStage::Proposal);
    }

    #[test]
    fn test_close_date() {
        let deal = extract("Expected to close by December 15th, worth $10,000.").unwrap();
        assert_eq!(deal.close_date.as_deref(), Some("december 15th"));

        let deal = extract("Deadline 12/31/2026 and budget 5,000.").unwrap();
        assert_eq!(deal.close_date.as_deref(), Some("12/31/2026"));
    }

    #[test]
    fn test_description_skips_short_and_follow_up_segments() {
        let segments = normalize("Short one. We reviewed the integration plan. Next steps are unclear. Follow up soon please. Budget confirmed at 10,000 dollars.");
        assert_eq!(
            build_description(&segments),
            "we reviewed the integration plan. budget confirmed at 10,000 dollars"
        );
    }

    #[test]
    fn test_description_keeps_at_most_five_segments() {
        let segments: Vec<String> = (0..8).map(|i| format!("discussion point number {}", i)).collect();
        assert_eq!(build_description(&segments).split(". ").count(), 5);
    }
}
