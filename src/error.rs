use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),
}

pub type Result<T> = std::result::Result<T, CrmError>;
