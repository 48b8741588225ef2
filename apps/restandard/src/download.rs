//! Download assembly — named attachment payloads for the document retrieval
//! endpoints.
//!
//! Both paths reject empty resume data up front; the PDF path additionally
//! refuses before rendering when no transcoding engine is present, so the
//! caller can offer the alternate format instead of failing mid-stream.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::info;

use crate::compose::docx_bytes;
use crate::errors::AppError;
use crate::models::resume::StructuredResume;
use crate::models::standard::StandardId;
use crate::render::html::render_html;
use crate::transcode::PdfTranscoder;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A downloadable document: bytes plus the metadata the HTTP edge needs to
/// serve it as a file attachment.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl IntoResponse for Attachment {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        // The filename is sanitized to ASCII, so this only falls back if the
        // invariant is ever broken.
        let disposition = HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(self.content_type),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Renders, transcodes and names the PDF attachment for one request.
pub fn pdf_attachment(
    resume: &StructuredResume,
    standard: StandardId,
    transcoder: &dyn PdfTranscoder,
) -> Result<Attachment, AppError> {
    reject_empty(resume)?;
    if !transcoder.is_available() {
        return Err(AppError::UnavailableTranscoder(
            "PDF generation is not available on this deployment.".to_string(),
        ));
    }

    let markup = render_html(resume, standard);
    let bytes = transcoder.transcode(&markup)?;
    info!("Generated {} byte PDF for the {} standard", bytes.len(), standard);

    Ok(Attachment {
        filename: attachment_filename(resume, standard, "pdf"),
        content_type: PDF_CONTENT_TYPE,
        bytes: Bytes::from(bytes),
    })
}

/// Composes, packs and names the DOCX attachment for one request.
pub fn docx_attachment(
    resume: &StructuredResume,
    standard: StandardId,
) -> Result<Attachment, AppError> {
    reject_empty(resume)?;

    let bytes = docx_bytes(resume, standard)?;
    info!("Generated {} byte DOCX for the {} standard", bytes.len(), standard);

    Ok(Attachment {
        filename: attachment_filename(resume, standard, "docx"),
        content_type: DOCX_CONTENT_TYPE,
        bytes: Bytes::from(bytes),
    })
}

fn reject_empty(resume: &StructuredResume) -> Result<(), AppError> {
    if resume.is_empty() {
        return Err(AppError::MissingInput("Resume data is required".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Filename
// ────────────────────────────────────────────────────────────────────────────

/// `resume_<standard>_<sanitized full_name>.<ext>`, falling back to a plain
/// `resume` component when no name is present.
fn attachment_filename(resume: &StructuredResume, standard: StandardId, ext: &str) -> String {
    let name = resume
        .info("full_name")
        .map(sanitize_component)
        .unwrap_or_else(|| "resume".to_string());
    format!("resume_{}_{}.{}", standard.as_str(), name, ext)
}

/// Conservative filename sanitizer: ASCII alphanumerics, `-` and `_` pass
/// through, whitespace collapses to a single `_`, everything else is
/// dropped. Falls back to `resume` when nothing survives.
fn sanitize_component(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else if c.is_whitespace() && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "resume".to_string()
    } else {
        trimmed.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::TranscodeError;
    use serde_json::json;

    struct StubTranscoder {
        available: bool,
    }

    impl PdfTranscoder for StubTranscoder {
        fn is_available(&self) -> bool {
            self.available
        }

        fn transcode(&self, markup: &str) -> Result<Vec<u8>, TranscodeError> {
            Ok(format!("%PDF-stub {} bytes", markup.len()).into_bytes())
        }
    }

    fn make_resume(value: serde_json::Value) -> StructuredResume {
        serde_json::from_value(value).expect("fixture must parse")
    }

    fn make_jane() -> StructuredResume {
        make_resume(json!({
            "personal_info": {"full_name": "Jane Doe", "email": "jane@x.com"},
            "summary": "Led teams.",
            "experience": [], "education": [], "skills": ["Python"]
        }))
    }

    // ── empty-input rejection ───────────────────────────────────────────────

    #[test]
    fn test_empty_resume_rejected_before_rendering() {
        let empty = StructuredResume::default();
        let transcoder = StubTranscoder { available: true };
        let err = pdf_attachment(&empty, StandardId::UsAts, &transcoder).unwrap_err();
        assert!(matches!(err, AppError::MissingInput(_)));
        let err = docx_attachment(&empty, StandardId::UsAts).unwrap_err();
        assert!(matches!(err, AppError::MissingInput(_)));
    }

    // ── transcoder availability ─────────────────────────────────────────────

    #[test]
    fn test_unavailable_transcoder_detected_up_front() {
        let transcoder = StubTranscoder { available: false };
        let err = pdf_attachment(&make_jane(), StandardId::UsAts, &transcoder).unwrap_err();
        assert!(
            matches!(err, AppError::UnavailableTranscoder(_)),
            "availability must be checked before transcoding is attempted"
        );
    }

    #[test]
    fn test_pdf_attachment_metadata() {
        let transcoder = StubTranscoder { available: true };
        let attachment = pdf_attachment(&make_jane(), StandardId::Europass, &transcoder).unwrap();
        assert_eq!(attachment.filename, "resume_europass_Jane_Doe.pdf");
        assert_eq!(attachment.content_type, PDF_CONTENT_TYPE);
        assert!(attachment.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_docx_attachment_metadata() {
        let attachment = docx_attachment(&make_jane(), StandardId::UsAts).unwrap();
        assert_eq!(attachment.filename, "resume_us_ats_Jane_Doe.docx");
        assert_eq!(attachment.content_type, DOCX_CONTENT_TYPE);
        assert!(attachment.bytes.starts_with(b"PK"), "DOCX must be a zip package");
    }

    // ── filename sanitization ───────────────────────────────────────────────

    #[test]
    fn test_sanitize_component_keeps_safe_chars() {
        assert_eq!(sanitize_component("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_component("Anne-Marie O'Neil"), "Anne-Marie_ONeil");
    }

    #[test]
    fn test_sanitize_component_drops_hostile_chars() {
        assert_eq!(sanitize_component("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_component("a\"b<c>d"), "abcd");
    }

    #[test]
    fn test_sanitize_component_collapses_whitespace() {
        assert_eq!(sanitize_component("  Jane   Q.  Doe  "), "Jane_Q_Doe");
    }

    #[test]
    fn test_sanitize_component_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_component("😀 😀"), "resume");
        assert_eq!(sanitize_component(""), "resume");
    }

    #[test]
    fn test_filename_without_full_name_uses_resume() {
        let resume = make_resume(json!({
            "personal_info": {"email": "a@b.c"},
            "summary": "x", "experience": [], "education": [], "skills": []
        }));
        assert_eq!(
            attachment_filename(&resume, StandardId::UkProfessional, "docx"),
            "resume_uk_professional_resume.docx"
        );
    }

    // ── response shape ──────────────────────────────────────────────────────

    #[test]
    fn test_attachment_into_response_sets_headers() {
        let attachment = Attachment {
            filename: "resume_us_ats_Jane_Doe.pdf".to_string(),
            content_type: PDF_CONTENT_TYPE,
            bytes: Bytes::from_static(b"%PDF-1.7"),
        };
        let response = attachment.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PDF_CONTENT_TYPE
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("resume_us_ats_Jane_Doe.pdf"));
    }
}
