//! Document composer — structured resume → a paginated DOCX package.
//!
//! Formatting here is intentionally uniform across all four standards: same
//! font, same heading treatment, only the data differs. The per-standard
//! presentation variation lives entirely in the markup renderer; do not add
//! styling branches here.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start,
};
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::{present, EducationEntry, ExperienceEntry, StructuredResume};
use crate::models::standard::StandardId;

/// Numbering id of the shared bullet-list definition.
const BULLET_NUMBERING: usize = 1;

// Run sizes are in half-points.
const NAME_SIZE: usize = 40; // 20pt
const CONTACT_SIZE: usize = 20; // 10pt
const BODY_SIZE: usize = 22; // 11pt

/// Composes the in-memory document object for one resume.
///
/// Pure: no I/O and no failure path. `_standard` is part of the contract
/// (it selects the data upstream and names the attachment) but does not
/// influence formatting.
pub fn compose_docx(resume: &StructuredResume, _standard: StandardId) -> Docx {
    let mut doc = Docx::new()
        .default_fonts(RunFonts::new().ascii("Arial"))
        .default_size(BODY_SIZE)
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    // Header: name plus the ` | `-joined contact line.
    doc = doc.add_paragraph(
        Paragraph::new().align(AlignmentType::Center).add_run(
            Run::new()
                .add_text(resume.full_name())
                .bold()
                .size(NAME_SIZE),
        ),
    );
    let contact = contact_line(resume);
    if !contact.is_empty() {
        doc = doc.add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(contact).size(CONTACT_SIZE)),
        );
    }

    let summary = resume.summary.trim();
    if !summary.is_empty() {
        doc = doc
            .add_paragraph(heading("Professional Summary"))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(summary)));
    }

    if !resume.experience.is_empty() {
        doc = doc.add_paragraph(heading("Work Experience"));
        for entry in &resume.experience {
            doc = add_experience(doc, entry);
        }
    }

    if !resume.education.is_empty() {
        doc = doc.add_paragraph(heading("Education"));
        for entry in &resume.education {
            doc = doc.add_paragraph(education_paragraph(entry));
        }
    }

    let skills = resume.skills.flattened();
    if !skills.is_empty() {
        doc = doc
            .add_paragraph(heading("Skills"))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(skills.join(", "))));
    }

    doc
}

/// Serializes the composed document to DOCX bytes.
pub fn docx_bytes(resume: &StructuredResume, standard: StandardId) -> Result<Vec<u8>, AppError> {
    let mut docx = compose_docx(resume, standard);
    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::ComposeFailure(format!("failed to pack document: {e}")))?;
    let bytes = cursor.into_inner();
    debug!("Composed {} byte DOCX package", bytes.len());
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold())
}

/// Joins the present contact fields with ` | `; absent fields leave no
/// separator behind.
fn contact_line(resume: &StructuredResume) -> String {
    ["email", "phone", "location"]
        .iter()
        .filter_map(|key| resume.info(key))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// One paragraph per entry: bold title run, then ` | `-separated company and
/// date range — only for the pieces that are actually present.
fn experience_paragraph(entry: &ExperienceEntry) -> Paragraph {
    let range = entry.date_range();
    entry_paragraph(
        present(&entry.title),
        [present(&entry.company), range.as_deref()],
    )
}

fn education_paragraph(entry: &EducationEntry) -> Paragraph {
    entry_paragraph(
        present(&entry.degree),
        [
            present(&entry.institution),
            present(&entry.graduation_date),
        ],
    )
}

fn entry_paragraph<const N: usize>(lead: Option<&str>, rest: [Option<&str>; N]) -> Paragraph {
    let mut para = Paragraph::new();
    let mut any = false;
    if let Some(lead) = lead {
        para = para.add_run(Run::new().add_text(lead).bold());
        any = true;
    }
    for piece in rest.into_iter().flatten() {
        let text = if any {
            format!(" | {piece}")
        } else {
            piece.to_string()
        };
        para = para.add_run(Run::new().add_text(text));
        any = true;
    }
    para
}

fn add_experience(mut doc: Docx, entry: &ExperienceEntry) -> Docx {
    doc = doc.add_paragraph(experience_paragraph(entry));
    for achievement in &entry.achievements {
        let text = achievement.trim();
        if text.is_empty() {
            continue;
        }
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(text))
                .numbering(
                    NumberingId::new(BULLET_NUMBERING),
                    IndentLevel::new(0),
                ),
        );
    }
    doc
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
