use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::constants::{UNKNOWN_COMPANY, UNKNOWN_CUSTOMER};

/// Kind of customer touchpoint described by a voice note.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Meeting,
    Call,
    Demo,
    Email,
    #[default]
    Other,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Meeting => "meeting",
            InteractionType::Call => "call",
            InteractionType::Demo => "demo",
            InteractionType::Email => "email",
            InteractionType::Other => "other",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales pipeline stage of a deal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    #[default]
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Prospecting => "prospecting",
            DealStage::Qualification => "qualification",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::ClosedWon => "closed_won",
            DealStage::ClosedLost => "closed_lost",
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory data-quality warning. Serializes as its human-readable text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QualityFlag {
    #[serde(rename = "Customer name not identified")]
    CustomerNameMissing,
    #[serde(rename = "Company name not identified")]
    CompanyNameMissing,
    #[serde(rename = "No contact information found")]
    NoContactInfo,
    #[serde(rename = "No key points identified")]
    NoKeyPoints,
    #[serde(rename = "No next steps identified")]
    NoNextSteps,
    #[serde(rename = "Uncertainty detected in transcript")]
    UncertaintyDetected,
    #[serde(rename = "Information may need verification")]
    NeedsVerification,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::CustomerNameMissing => "Customer name not identified",
            QualityFlag::CompanyNameMissing => "Company name not identified",
            QualityFlag::NoContactInfo => "No contact information found",
            QualityFlag::NoKeyPoints => "No key points identified",
            QualityFlag::NoNextSteps => "No next steps identified",
            QualityFlag::UncertaintyDetected => "Uncertainty detected in transcript",
            QualityFlag::NeedsVerification => "Information may need verification",
        }
    }

    /// Short label used for metric dimensions
    pub fn label(&self) -> &'static str {
        match self {
            QualityFlag::CustomerNameMissing => "customer_name_missing",
            QualityFlag::CompanyNameMissing => "company_name_missing",
            QualityFlag::NoContactInfo => "no_contact_info",
            QualityFlag::NoKeyPoints => "no_key_points",
            QualityFlag::NoNextSteps => "no_next_steps",
            QualityFlag::UncertaintyDetected => "uncertainty_detected",
            QualityFlag::NeedsVerification => "needs_verification",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the voice note was about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl CustomerRecord {
    /// True when the name is a real extraction rather than the sentinel
    pub fn has_name(&self) -> bool {
        !self.name.is_empty() && self.name != UNKNOWN_CUSTOMER
    }

    pub fn has_company(&self) -> bool {
        !self.company.is_empty() && self.company != UNKNOWN_COMPANY
    }

    pub fn has_contact(&self) -> bool {
        !self.email.is_empty() || !self.phone.is_empty()
    }
}

/// What happened during the touchpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub summary: String,
    pub key_points: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

/// A sales opportunity mentioned in the voice note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub name: String,
    pub value: String,
    pub stage: DealStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<String>,
    pub description: String,
}

/// The structured record extracted from one transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedResult {
    pub customer: CustomerRecord,
    pub interaction: InteractionRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal: Option<DealRecord>,
    pub confidence: f64,
    pub flags: Vec<QualityFlag>,
}

impl ParsedResult {
    pub fn has_flag(&self, flag: QualityFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Result of a parse call: a validated record or every validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Success(ParsedResult),
    Failure(Vec<String>),
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    pub fn result(&self) -> Option<&ParsedResult> {
        match self {
            ParseOutcome::Success(result) => Some(result),
            ParseOutcome::Failure(_) => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            ParseOutcome::Success(_) => &[],
            ParseOutcome::Failure(errors) => errors,
        }
    }

    pub fn into_result(self) -> std::result::Result<ParsedResult, Vec<String>> {
        match self {
            ParseOutcome::Success(result) => Ok(result),
            ParseOutcome::Failure(errors) => Err(errors),
        }
    }
}

#[derive(Serialize)]
struct OutcomeBody<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a ParsedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [String]>,
}

// Wire shape: {"success": true, "data": {...}} or {"success": false, "errors": [...]}
impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let body = match self {
            ParseOutcome::Success(result) => OutcomeBody {
                success: true,
                data: Some(result),
                errors: None,
            },
            ParseOutcome::Failure(errors) => OutcomeBody {
                success: false,
                data: None,
                errors: Some(errors.as_slice()),
            },
        };
        body.serialize(serializer)
    }
}

/// Request payload accepted at the upstream boundary before `parse` runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceNoteInput {
    pub transcript: String,
    pub user_id: String,
}

impl VoiceNoteInput {
    /// Check every request rule, returning one message per violation
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.transcript.trim().is_empty() {
            errors.push("Transcript cannot be empty".to_string());
        }
        if Uuid::parse_str(&self.user_id).is_err() {
            errors.push(format!("userId '{}' is not a valid UUID", self.user_id));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enums_serialize_as_snake_case() {
        assert_eq!(serde_json::to_value(DealStage::ClosedWon).unwrap(), json!("closed_won"));
        assert_eq!(serde_json::to_value(InteractionType::Demo).unwrap(), json!("demo"));
        assert_eq!(DealStage::ClosedLost.to_string(), "closed_lost");
    }

    #[test]
    fn test_flag_serializes_as_message() {
        let value = serde_json::to_value(QualityFlag::NoContactInfo).unwrap();
        assert_eq!(value, json!("No contact information found"));

        let back: QualityFlag = serde_json::from_value(json!("No next steps identified")).unwrap();
        assert_eq!(back, QualityFlag::NoNextSteps);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let failure = ParseOutcome::Failure(vec!["bad".to_string()]);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "success": false, "errors": ["bad"] })
        );
    }

    #[test]
    fn test_interaction_uses_camel_case_keys() {
        let interaction = InteractionRecord {
            kind: InteractionType::Call,
            summary: "x.".to_string(),
            key_points: vec!["a".to_string()],
            next_steps: vec!["b".to_string()],
            follow_up_date: None,
        };
        let value = serde_json::to_value(&interaction).unwrap();
        assert_eq!(value["type"], json!("call"));
        assert!(value.get("keyPoints").is_some());
        assert!(value.get("followUpDate").is_none());
    }

    #[test]
    fn test_voice_note_input_reports_every_violation() {
        let input = VoiceNoteInput {
            transcript: "   ".to_string(),
            user_id: "not-a-uuid".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 2);

        let ok = VoiceNoteInput {
            transcript: "Met with John".to_string(),
            user_id: Uuid::new_v4().to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
