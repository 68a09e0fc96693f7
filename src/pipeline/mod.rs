// Voice note pipeline: normalize, extract, flag, score, validate

pub mod processing;

use chrono::{DateTime, FixedOffset, Local, Utc};
use tracing::{info, instrument, warn};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::metrics::VoiceNoteMetrics;
use crate::types::{ParseOutcome, ParsedResult};
use processing::confidence::score_confidence;
use processing::customer::extract_customer;
use processing::deal::extract_deal;
use processing::interaction::extract_interaction;
use processing::normalize::{DefaultNormalizer, Normalizer};
use processing::quality_gate::{DefaultQualityGate, QualityGate};
use processing::validation::SchemaValidator;

/// Source of the current time, used to stamp deal names.
///
/// The offset is part of the answer: deal names use the caller's local month.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the host's local zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant and offset
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn utc(at: DateTime<Utc>) -> Self {
        Self(at.fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Turns transcripts into validated CRM records.
///
/// Holds no mutable state; one parser can serve any number of threads.
pub struct VoiceNoteParser {
    config: ParserConfig,
    normalizer: DefaultNormalizer,
    quality_gate: DefaultQualityGate,
    validator: SchemaValidator,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for VoiceNoteParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceNoteParser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VoiceNoteParser {
    /// Build a parser on the system clock. Fails only if the embedded schema cannot compile.
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            normalizer: DefaultNormalizer,
            quality_gate: DefaultQualityGate::new(),
            validator: SchemaValidator::new()?,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the clock used for deal names
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn validator(&self) -> &SchemaValidator {
        &self.validator
    }

    /// Whether a score falls below the configured confidence threshold
    pub fn is_low_confidence(&self, confidence: f64) -> bool {
        confidence < self.config.confidence_threshold
    }

    /// Parse one transcript. Never panics and never returns an error for any input.
    #[instrument(skip(self, transcript), fields(transcript_chars = transcript.chars().count()))]
    pub fn parse(&self, transcript: &str) -> ParseOutcome {
        let normalized = self.normalizer.normalize(transcript);
        let segments = normalized.segments();

        let customer = extract_customer(segments);
        let interaction = extract_interaction(segments);
        let deal = extract_deal(segments, self.clock.now().date_naive());

        let flags = self.quality_gate.identify_flags(segments, &customer, &interaction);
        let confidence = score_confidence(&customer, &interaction, &flags);

        let result = ParsedResult {
            customer,
            interaction: interaction.record,
            deal,
            confidence,
            flags,
        };

        let outcome = self.validator.validate(&result);
        match &outcome {
            ParseOutcome::Success(parsed) => {
                info!(
                    confidence = parsed.confidence,
                    flags = parsed.flags.len(),
                    deal = parsed.deal.is_some(),
                    "Parsed voice note"
                );
                VoiceNoteMetrics::record_parse_success(parsed.confidence, &parsed.flags, parsed.deal.is_some());
            }
            ParseOutcome::Failure(errors) => {
                warn!(error_count = errors.len(), "Voice note failed validation");
                VoiceNoteMetrics::record_parse_failure(errors.len());
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parser() -> VoiceNoteParser {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap());
        VoiceNoteParser::new(ParserConfig::default()).unwrap().with_clock(clock)
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_parser_is_send_and_sync() {
        assert_send_sync::<VoiceNoteParser>();
    }

    #[test]
    fn test_parse_is_deterministic_with_fixed_clock() {
        let parser = parser();
        let transcript = "Had a demo with Priya Patel from Northwind. They mentioned budget approval. Worth $20,000.";
        assert_eq!(parser.parse(transcript), parser.parse(transcript));
    }

    #[test]
    fn test_deal_name_uses_clock() {
        let outcome = parser().parse("Call with Ann Lee from Initech. The deal is worth $5,000.");
        let deal = outcome.result().and_then(|r| r.deal.clone()).unwrap();
        assert_eq!(deal.name, "Deal - Oct 2026");
    }

    #[test]
    fn test_deal_name_uses_local_month_at_boundary() {
        // 23:30 on Oct 31 in UTC-7 is already Nov 1 in UTC
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let at = pacific.with_ymd_and_hms(2026, 10, 31, 23, 30, 0).unwrap();
        assert_eq!(at.with_timezone(&Utc).format("%b").to_string(), "Nov");

        let parser = VoiceNoteParser::new(ParserConfig::default()).unwrap().with_clock(FixedClock(at));
        let outcome = parser.parse("Call with Ann Lee from Initech. The deal is worth $5,000.");
        let deal = outcome.result().and_then(|r| r.deal.clone()).unwrap();
        assert_eq!(deal.name, "Deal - Oct 2026");
    }

    #[test]
    fn test_system_clock_reports_local_offset() {
        let now = SystemClock.now();
        assert_eq!(now.offset(), Local::now().offset());
    }

    #[test]
    fn test_low_confidence_uses_threshold() {
        let parser = parser();
        assert!(parser.is_low_confidence(0.65));
        assert!(!parser.is_low_confidence(0.7));
    }
}
