//! AI conversion collaborator — free resume text → [`StructuredResume`].
//!
//! The conversion model returns JSON whose five top-level sections are
//! validated here before the record reaches the renderers. The shapes
//! *inside* those sections stay untrusted; the data model deserializes them
//! leniently (see [`crate::models::de`]).

pub mod client;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::convert::client::AnthropicClient;
use crate::models::resume::StructuredResume;
use crate::models::standard::StandardId;

/// The five sections every conversion response must carry. Their shapes are
/// not guaranteed, only their presence.
const REQUIRED_SECTIONS: [&str; 5] = [
    "personal_info",
    "summary",
    "experience",
    "education",
    "skills",
];

/// Conversion failures, each reported upstream as a distinct condition.
/// All are terminal for the request; none are recoverable by retrying with
/// the same input.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Resume text cannot be empty")]
    EmptyInput,

    #[error("AI service rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("AI service request timed out")]
    Timeout,

    #[error("AI service unreachable: {0}")]
    Connectivity(String),

    #[error("AI service quota exhausted")]
    QuotaExceeded,

    #[error("AI service rejected the configured credentials")]
    InvalidCredentials,

    #[error("AI service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI response was not usable: {0}")]
    InvalidResponse(String),

    #[error("AI response missing required section: {0}")]
    MissingSection(&'static str),
}

/// Converts raw resume text into a structured record for a target standard.
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn convert(
        &self,
        raw_text: &str,
        standard: StandardId,
    ) -> Result<StructuredResume, ConvertError>;
}

/// [`ConversionService`] backed by an explicitly constructed
/// [`AnthropicClient`].
pub struct LlmConverter {
    client: AnthropicClient,
}

impl LlmConverter {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConversionService for LlmConverter {
    async fn convert(
        &self,
        raw_text: &str,
        standard: StandardId,
    ) -> Result<StructuredResume, ConvertError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        info!(
            "Converting {} chars of resume text to the {} standard",
            text.len(),
            standard
        );
        let prompt = build_prompt(text, standard);
        let response = self.client.complete(CONVERSION_SYSTEM, &prompt).await?;
        let resume = parse_response(&response)?;
        debug!(
            "Conversion produced {} experience and {} education entries",
            resume.experience.len(),
            resume.education.len()
        );
        Ok(resume)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response handling
// ────────────────────────────────────────────────────────────────────────────

/// Parses and validates a model response into a resume record.
pub(crate) fn parse_response(response: &str) -> Result<StructuredResume, ConvertError> {
    let stripped = client::strip_json_fences(response);
    let value: Value = serde_json::from_str(stripped)
        .map_err(|e| ConvertError::InvalidResponse(format!("not valid JSON: {e}")))?;
    validate_sections(&value)?;
    serde_json::from_value(value)
        .map_err(|e| ConvertError::InvalidResponse(format!("unexpected structure: {e}")))
}

/// Checks that all five top-level sections are present. Downstream code may
/// assume their existence, never their shapes.
pub(crate) fn validate_sections(value: &Value) -> Result<(), ConvertError> {
    let Some(map) = value.as_object() else {
        return Err(ConvertError::InvalidResponse(
            "top level is not an object".to_string(),
        ));
    };
    for key in REQUIRED_SECTIONS {
        if !map.contains_key(key) {
            return Err(ConvertError::MissingSection(key));
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt
// ────────────────────────────────────────────────────────────────────────────

const CONVERSION_SYSTEM: &str = "You are an expert resume conversion assistant. \
    Always return valid JSON only, no markdown, no explanations.";

fn build_prompt(text: &str, standard: StandardId) -> String {
    format!(
        "Convert the resume below into structured JSON for the {} standard.\n\
         Return one JSON object with exactly these top-level keys:\n\
         personal_info (object of string fields including full_name),\n\
         summary (string),\n\
         experience (array of {{title, company, location, start_date, end_date, description, achievements}}),\n\
         education (array of {{degree, institution, location, graduation_date}}),\n\
         skills (array of strings).\n\
         Omit fields that are not in the source text instead of inventing them.\n\n\
         Resume:\n{}",
        standard.display_name(),
        text,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
