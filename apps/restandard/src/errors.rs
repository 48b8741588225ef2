use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::convert::ConvertError;
use crate::transcode::TranscodeError;

/// Application-level error type.
/// Implements `IntoResponse` so the HTTP edge can return `Result<T, AppError>`
/// from its handlers. Every condition maps to a distinct code so clients can
/// react (e.g. offer the DOCX download when the PDF path is unavailable).
#[derive(Debug, Error)]
pub enum AppError {
    /// Resume data absent or empty — rejected before rendering begins.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// PDF requested but no transcoding engine exists on this deployment.
    #[error("PDF transcoder unavailable: {0}")]
    UnavailableTranscoder(String),

    /// The transcoding engine ran and failed on our own markup.
    #[error("PDF transcoding failed: {0}")]
    TranscodeFailure(String),

    /// Document-object assembly or packaging failed.
    #[error("Document composition failed: {0}")]
    ComposeFailure(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<TranscodeError> for AppError {
    fn from(err: TranscodeError) -> Self {
        match err {
            TranscodeError::Unavailable(msg) => AppError::UnavailableTranscoder(msg),
            TranscodeError::Failed(msg) => AppError::TranscodeFailure(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(msg) => (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone()),
            AppError::UnavailableTranscoder(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "TRANSCODER_UNAVAILABLE",
                format!("{msg} Use the DOCX download instead."),
            ),
            AppError::TranscodeFailure(msg) => {
                // Our renderer produced the markup, so this should not happen.
                tracing::error!("Unexpected transcode failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TRANSCODE_FAILURE",
                    "Failed to generate the PDF document".to_string(),
                )
            }
            AppError::ComposeFailure(msg) => {
                tracing::error!("Unexpected compose failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMPOSE_FAILURE",
                    "Failed to generate the document".to_string(),
                )
            }
            AppError::Convert(err) => convert_response(err),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Each conversion failure surfaces as its own status so callers can tell
/// rate limiting from bad credentials from an unreachable upstream.
fn convert_response(err: &ConvertError) -> (StatusCode, &'static str, String) {
    match err {
        ConvertError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            "EMPTY_INPUT",
            err.to_string(),
        ),
        ConvertError::RateLimited { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            err.to_string(),
        ),
        ConvertError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "AI_TIMEOUT", err.to_string()),
        ConvertError::Connectivity(_) => {
            tracing::error!("Conversion connectivity error: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "AI_UNREACHABLE",
                "The conversion service could not be reached".to_string(),
            )
        }
        ConvertError::QuotaExceeded => (
            StatusCode::PAYMENT_REQUIRED,
            "QUOTA_EXCEEDED",
            err.to_string(),
        ),
        ConvertError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            err.to_string(),
        ),
        ConvertError::Api { .. }
        | ConvertError::InvalidResponse(_)
        | ConvertError::MissingSection(_) => {
            tracing::error!("Conversion error: {err}");
            (
                StatusCode::BAD_GATEWAY,
                "AI_INVALID_RESPONSE",
                "The conversion service returned an unusable response".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_maps_to_bad_request() {
        let response = AppError::MissingInput("Resume data is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unavailable_transcoder_maps_to_service_unavailable() {
        let response =
            AppError::UnavailableTranscoder("weasyprint is not installed.".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_conversion_conditions_map_to_distinct_statuses() {
        let cases = [
            (ConvertError::RateLimited { retries: 3 }, StatusCode::TOO_MANY_REQUESTS),
            (ConvertError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (ConvertError::QuotaExceeded, StatusCode::PAYMENT_REQUIRED),
            (ConvertError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ConvertError::MissingSection("skills"), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            let response = AppError::Convert(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_transcode_error_conversion_keeps_conditions_apart() {
        let unavailable: AppError = TranscodeError::Unavailable("no binary".to_string()).into();
        assert!(matches!(unavailable, AppError::UnavailableTranscoder(_)));
        let failed: AppError = TranscodeError::Failed("exit 1".to_string()).into();
        assert!(matches!(failed, AppError::TranscodeFailure(_)));
    }
}
