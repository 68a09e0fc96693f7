//! Deterministic confidence score for an extraction.
//!
//! Starts at 1.0 and subtracts a fixed penalty per missing piece of
//! information, plus a small penalty per raised flag.

use crate::pipeline::processing::interaction::InteractionExtraction;
use crate::types::{CustomerRecord, InteractionType, QualityFlag};

const NAME_MISSING_PENALTY: f64 = 0.15;
const COMPANY_MISSING_PENALTY: f64 = 0.10;
const EMAIL_MISSING_PENALTY: f64 = 0.05;
const PHONE_MISSING_PENALTY: f64 = 0.05;
const UNCLASSIFIED_TYPE_PENALTY: f64 = 0.10;
const NO_KEY_POINTS_PENALTY: f64 = 0.10;
const NO_NEXT_STEPS_PENALTY: f64 = 0.10;
const PER_FLAG_PENALTY: f64 = 0.05;

/// Score an extraction in `[0, 1]`, rounded to two decimals.
pub fn score_confidence(
    customer: &CustomerRecord,
    interaction: &InteractionExtraction,
    flags: &[QualityFlag],
) -> f64 {
    let penalties = [
        (!customer.has_name(), NAME_MISSING_PENALTY),
        (!customer.has_company(), COMPANY_MISSING_PENALTY),
        (customer.email.is_empty(), EMAIL_MISSING_PENALTY),
        (customer.phone.is_empty(), PHONE_MISSING_PENALTY),
        (interaction.record.kind == InteractionType::Other, UNCLASSIFIED_TYPE_PENALTY),
        (!interaction.key_points_found, NO_KEY_POINTS_PENALTY),
        (!interaction.next_steps_found, NO_NEXT_STEPS_PENALTY),
    ];

    let mut score = 1.0;
    for (applies, penalty) in penalties {
        if applies {
            score -= penalty;
        }
    }
    score -= PER_FLAG_PENALTY * flags.len() as f64;

    round_score(score.clamp(0.0, 1.0))
}

fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
