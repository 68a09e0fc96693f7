use crate::pipeline::processing::interaction::InteractionExtraction;
use crate::types::{CustomerRecord, QualityFlag};

/// Trait for implementing data-quality flagging over an extraction
pub trait QualityGate {
    /// Inspect the extracted records and raw segments and return advisory flags
    fn identify_flags(
        &self,
        segments: &[String],
        customer: &CustomerRecord,
        interaction: &InteractionExtraction,
    ) -> Vec<QualityFlag>;
}

/// Configuration for the keyword-driven transcript checks
#[derive(Debug, Clone)]
pub struct QualityGateConfig {
    /// Phrases signalling the speaker was unsure
    pub uncertainty_keywords: &'static [&'static str],
    /// Phrases signalling facts still need checking
    pub verification_keywords: &'static [&'static str],
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            uncertainty_keywords: &["not sure", "maybe", "uncertain", "unclear", "tentative", "possibly"],
            verification_keywords: &["follow up", "check", "verify", "confirm"],
        }
    }
}

/// Default Quality Gate implementation with configurable keyword lists
#[derive(Debug, Clone, Default)]
pub struct DefaultQualityGate {
    pub config: QualityGateConfig,
}

impl DefaultQualityGate {
    /// Create a Quality Gate with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Quality Gate with custom configuration
    pub fn with_config(config: QualityGateConfig) -> Self {
        Self { config }
    }

    /// Whether any segment contains any of the keywords (plain substring match)
    fn any_segment_mentions(segments: &[String], keywords: &[&str]) -> bool {
        segments
            .iter()
            .any(|segment| keywords.iter().any(|keyword| segment.contains(keyword)))
    }
}

impl QualityGate for DefaultQualityGate {
    fn identify_flags(
        &self,
        segments: &[String],
        customer: &CustomerRecord,
        interaction: &InteractionExtraction,
    ) -> Vec<QualityFlag> {
        let mut flags = Vec::new();

        // Customer identity
        if !customer.has_name() {
            flags.push(QualityFlag::CustomerNameMissing);
        }
        if !customer.has_company() {
            flags.push(QualityFlag::CompanyNameMissing);
        }
        if !customer.has_contact() {
            flags.push(QualityFlag::NoContactInfo);
        }

        // Evaluated against the lists as they were before placeholders went in
        if !interaction.key_points_found {
            flags.push(QualityFlag::NoKeyPoints);
        }
        if !interaction.next_steps_found {
            flags.push(QualityFlag::NoNextSteps);
        }

        // Transcript wording
        if Self::any_segment_mentions(segments, self.config.uncertainty_keywords) {
            flags.push(QualityFlag::UncertaintyDetected);
        }
        if Self::any_segment_mentions(segments, self.config.verification_keywords) {
            flags.push(QualityFlag::NeedsVerification);
        }

        if !flags.is_empty() {
            tracing::debug!(flag_count = flags.len(), "Quality flags raised");
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{UNKNOWN_COMPANY, UNKNOWN_CUSTOMER};
    use crate::types::{InteractionRecord, InteractionType};

    fn known_customer() -> CustomerRecord {
        CustomerRecord {
            name: "Sarah Johnson".to_string(),
            company: "Techstart Inc".to_string(),
            email: "sarah@techstart.io".to_string(),
            phone: String::new(),
            notes: String::new(),
        }
    }

    fn interaction(key_points_found: bool, next_steps_found: bool) -> InteractionExtraction {
        InteractionExtraction {
            record: InteractionRecord {
                kind: InteractionType::Call,
                summary: "call.".to_string(),
                key_points: vec!["point".to_string()],
                next_steps: vec!["step".to_string()],
                follow_up_date: None,
            },
            key_points_found,
            next_steps_found,
        }
    }

    fn segments(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_complete_extraction_raises_no_flags() {
        let gate = DefaultQualityGate::new();
        let flags = gate.identify_flags(&segments(&["all good here"]), &known_customer(), &interaction(true, true));
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flags_follow_fixed_order() {
        let gate = DefaultQualityGate::new();
        let customer = CustomerRecord {
            name: UNKNOWN_CUSTOMER.to_string(),
            company: UNKNOWN_COMPANY.to_string(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
        };
        let flags = gate.identify_flags(
            &segments(&["maybe next quarter", "please confirm the budget"]),
            &customer,
            &interaction(false, false),
        );

        assert_eq!(
            flags,
            vec![
                QualityFlag::CustomerNameMissing,
                QualityFlag::CompanyNameMissing,
                QualityFlag::NoContactInfo,
                QualityFlag::NoKeyPoints,
                QualityFlag::NoNextSteps,
                QualityFlag::UncertaintyDetected,
                QualityFlag::NeedsVerification,
            ]
        );
    }

    #[test]
    fn test_keyword_flags_fire_once() {
        let gate = DefaultQualityGate::new();
        let flags = gate.identify_flags(
            &segments(&["not sure", "maybe", "unclear", "check this", "verify that"]),
            &known_customer(),
            &interaction(true, true),
        );
        assert_eq!(flags, vec![QualityFlag::UncertaintyDetected, QualityFlag::NeedsVerification]);
    }

    #[test]
    fn test_phone_alone_counts_as_contact() {
        let gate = DefaultQualityGate::new();
        let mut customer = known_customer();
        customer.email.clear();
        customer.phone = "555-123-4567".to_string();
        let flags = gate.identify_flags(&segments(&["fine"]), &customer, &interaction(true, true));
        assert!(!flags.contains(&QualityFlag::NoContactInfo));
    }

    #[test]
    fn test_custom_keywords() {
        let gate = DefaultQualityGate::with_config(QualityGateConfig {
            uncertainty_keywords: &["perhaps"],
            verification_keywords: &[],
        });
        let flags = gate.identify_flags(&segments(&["perhaps", "maybe check"]), &known_customer(), &interaction(true, true));
        assert_eq!(flags, vec![QualityFlag::UncertaintyDetected]);
    }
}
