//! Fixed strings shared across the extraction stages.
//!
//! Sentinels keep required customer fields populated when nothing matched;
//! placeholders keep the interaction lists non-empty.

// Customer sentinels
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

// Interaction list placeholders
pub const NO_KEY_POINTS_PLACEHOLDER: &str = "No specific key points identified in the transcript.";
pub const NO_NEXT_STEPS_PLACEHOLDER: &str = "No next steps identified in the transcript.";

// Deal naming
pub const DEAL_NAME_PREFIX: &str = "Deal - ";
pub const DEAL_NAME_DATE_FORMAT: &str = "%b %Y";

// Segment windows
pub const SUMMARY_SEGMENTS: usize = 3;
pub const MAX_DESCRIPTION_SEGMENTS: usize = 5;

// Default for the parser section of config.toml
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

// Defaults for the logging section of config.toml
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE_NAME: &str = "crm-voice-notes.log";

/// Path used when neither `--config` nor `CRM_CONFIG` is given
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment overrides
pub const ENV_CONFIG_PATH: &str = "CRM_CONFIG";
pub const ENV_CONFIDENCE_THRESHOLD: &str = "CRM_CONFIDENCE_THRESHOLD";

/// Embedded structural contract for a parsed voice note
pub const PARSED_VOICE_NOTE_SCHEMA: &str = include_str!("../schemas/parsed_voice_note.v1.json");
