use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

use crm_voice_notes::constants::PARSED_VOICE_NOTE_SCHEMA;
use crm_voice_notes::logging;
use crm_voice_notes::{Config, ParseOutcome, VoiceNoteInput, VoiceNoteParser};

#[derive(Parser)]
#[command(name = "crm-voice-notes")]
#[command(about = "Extract CRM records from sales voice note transcripts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to config.toml (defaults to $CRM_CONFIG, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a transcript and print the outcome as JSON (reads stdin when no source is given)
    Parse {
        /// Transcript text
        #[arg(long, conflicts_with_all = ["file", "request"])]
        text: Option<String>,
        /// File containing the transcript
        #[arg(long, conflicts_with = "request")]
        file: Option<PathBuf>,
        /// JSON request file with `transcript` and `userId`
        #[arg(long)]
        request: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the JSON Schema every parsed record is validated against
    Schema,
}

fn read_transcript(text: Option<String>, file: Option<PathBuf>, request: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()));
    }

    if let Some(path) = request {
        let data = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let input: VoiceNoteInput = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse request JSON in {}", path.display()))?;
        if let Err(errors) = input.validate() {
            bail!(crm_voice_notes::CrmError::InvalidInput(errors));
        }
        info!(user_id = %input.user_id, "Accepted voice note request");
        return Ok(input.transcript);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read transcript from stdin")?;
    Ok(buffer)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    logging::init_logging(&config.logging);

    match cli.command {
        Commands::Parse {
            text,
            file,
            request,
            pretty,
        } => {
            let transcript = read_transcript(text, file, request)?;
            let parser = VoiceNoteParser::new(config.parser.clone()).context("Failed to build voice note parser")?;
            let outcome = parser.parse(&transcript);

            let json = if pretty {
                serde_json::to_string_pretty(&outcome)?
            } else {
                serde_json::to_string(&outcome)?
            };
            println!("{}", json);

            match outcome {
                ParseOutcome::Success(result) => {
                    if parser.is_low_confidence(result.confidence) {
                        warn!(
                            "Confidence {:.2} is below the configured threshold {:.2}; review before saving",
                            result.confidence, config.parser.confidence_threshold
                        );
                    }
                }
                ParseOutcome::Failure(errors) => {
                    bail!("Transcript produced an invalid record ({} validation errors)", errors.len());
                }
            }
        }
        Commands::Schema => {
            println!("{}", PARSED_VOICE_NOTE_SCHEMA.trim_end());
        }
    }

    Ok(())
}
