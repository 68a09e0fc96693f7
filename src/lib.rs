//! Extracts structured CRM records from transcribed sales voice notes.
//!
//! ```no_run
//! use crm_voice_notes::{ParserConfig, VoiceNoteParser};
//!
//! let parser = VoiceNoteParser::new(ParserConfig::default())?;
//! let outcome = parser.parse("Met with John from Acme. Discussed pricing.");
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use config::{Config, LoggingConfig, ParserConfig};
pub use error::{CrmError, Result};
pub use pipeline::processing::validation::SchemaValidator;
pub use pipeline::{Clock, FixedClock, SystemClock, VoiceNoteParser};
pub use types::{
    CustomerRecord, DealRecord, DealStage, InteractionRecord, InteractionType, ParseOutcome, ParsedResult,
    QualityFlag, VoiceNoteInput,
};
