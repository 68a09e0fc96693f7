//! Structural validation of assembled records against the embedded JSON Schema.

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::constants::PARSED_VOICE_NOTE_SCHEMA;
use crate::error::{CrmError, Result};
use crate::types::{ParseOutcome, ParsedResult};

/// Compiled `parsed_voice_note.v1` schema
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Parse and compile the embedded schema.
    pub fn new() -> Result<Self> {
        let schema: Value = serde_json::from_str(PARSED_VOICE_NOTE_SCHEMA)?;

        // The compiled schema owns its data; the source value can be dropped
        let compiled = JSONSchema::options()
            .compile(&schema)
            .map_err(|e| CrmError::Schema(format!("Failed to compile JSON Schema: {}", e)))?;

        Ok(Self { compiled })
    }

    /// Validate a typed record. Values are never modified.
    pub fn validate(&self, result: &ParsedResult) -> ParseOutcome {
        match serde_json::to_value(result) {
            Ok(value) => self.validate_value(value),
            Err(e) => ParseOutcome::Failure(vec![format!("Failed to serialize result: {}", e)]),
        }
    }

    /// Validate an arbitrary JSON record, returning the typed record when it passes.
    pub fn validate_value(&self, instance: Value) -> ParseOutcome {
        let errors = self.collect_errors(&instance);
        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "Parsed record failed schema validation");
            return ParseOutcome::Failure(errors);
        }

        match serde_json::from_value::<ParsedResult>(instance) {
            Ok(result) => ParseOutcome::Success(result),
            Err(e) => ParseOutcome::Failure(vec![format!("Record does not match the result shape: {}", e)]),
        }
    }

    /// Whether the record satisfies the schema
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.compiled.is_valid(instance)
    }

    fn collect_errors(&self, instance: &Value) -> Vec<String> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect(),
        }
    }
}
