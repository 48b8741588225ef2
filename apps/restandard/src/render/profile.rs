//! Static per-standard presentation profiles.
//!
//! The markup renderer is a single algorithm parameterized by these records:
//! standards differ only in section labels, palette, contact-line layout,
//! and which optional fields they surface. Keeping the variation in data
//! guarantees every standard shares the same escaping and structural rules.

use crate::models::standard::StandardId;

// ────────────────────────────────────────────────────────────────────────────
// Profile types
// ────────────────────────────────────────────────────────────────────────────

/// How the header contact line is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactLayout {
    /// One `<span>` per present field on a single line.
    InlineSpans,
    /// One `Label: value` line per present field, `<br>`-separated.
    LabeledLines,
}

/// A contact field surfaced in the header: the `personal_info` key plus the
/// label prefix used by [`ContactLayout::LabeledLines`] (ignored for
/// [`ContactLayout::InlineSpans`]).
#[derive(Debug)]
pub struct ContactField {
    pub key: &'static str,
    pub label: &'static str,
}

/// Everything that varies between the four standards.
#[derive(Debug)]
pub struct StandardProfile {
    pub id: StandardId,

    // Section heading labels
    pub summary_heading: &'static str,
    pub experience_heading: &'static str,
    pub education_heading: &'static str,
    pub skills_heading: &'static str,

    // Palette
    /// Name (`h1`) color.
    pub name_color: &'static str,
    /// Section heading (`h2`) color.
    pub heading_color: &'static str,
    /// Rule under the header block, e.g. `3px solid #0066CC`.
    pub header_rule: &'static str,
    /// Rule under each section heading.
    pub heading_rule: &'static str,
    pub skill_tag_bg: &'static str,
    /// `None` renders borderless skill tags.
    pub skill_tag_border: Option<&'static str>,

    // Layout and surfaced fields
    pub centered_header: bool,
    pub contact_layout: ContactLayout,
    pub contact_fields: &'static [ContactField],
    /// Surface the free-text `description` on experience entries.
    pub experience_description: bool,
    pub education_field_of_study: bool,
    pub education_grade: bool,
    pub education_university: bool,
    pub education_percentage: bool,
    pub education_honors: bool,
}

/// Returns the static profile for a standard.
pub fn profile(standard: StandardId) -> &'static StandardProfile {
    match standard {
        StandardId::UsAts => &US_ATS,
        StandardId::Europass => &EUROPASS,
        StandardId::IndianCorporate => &INDIAN_CORPORATE,
        StandardId::UkProfessional => &UK_PROFESSIONAL,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The four profiles
// ────────────────────────────────────────────────────────────────────────────

static US_ATS: StandardProfile = StandardProfile {
    id: StandardId::UsAts,
    summary_heading: "Professional Summary",
    experience_heading: "Work Experience",
    education_heading: "Education",
    skills_heading: "Skills",
    name_color: "#000",
    heading_color: "#000",
    header_rule: "2px solid #333",
    heading_rule: "1px solid #333",
    skill_tag_bg: "#f0f0f0",
    skill_tag_border: None,
    centered_header: true,
    contact_layout: ContactLayout::InlineSpans,
    contact_fields: &[
        ContactField { key: "email", label: "Email" },
        ContactField { key: "phone", label: "Phone" },
        ContactField { key: "location", label: "Location" },
    ],
    experience_description: false,
    education_field_of_study: false,
    education_grade: false,
    education_university: false,
    education_percentage: false,
    education_honors: false,
};

static EUROPASS: StandardProfile = StandardProfile {
    id: StandardId::Europass,
    summary_heading: "Personal Statement",
    experience_heading: "Work Experience",
    education_heading: "Education and Training",
    skills_heading: "Skills and Competences",
    name_color: "#0066CC",
    heading_color: "#0066CC",
    header_rule: "3px solid #0066CC",
    heading_rule: "2px solid #0066CC",
    skill_tag_bg: "#E6F2FF",
    skill_tag_border: Some("1px solid #0066CC"),
    centered_header: false,
    contact_layout: ContactLayout::LabeledLines,
    contact_fields: &[
        ContactField { key: "email", label: "Email" },
        ContactField { key: "phone", label: "Phone" },
        ContactField { key: "location", label: "Address" },
    ],
    experience_description: true,
    education_field_of_study: true,
    education_grade: true,
    education_university: false,
    education_percentage: false,
    education_honors: false,
};

static INDIAN_CORPORATE: StandardProfile = StandardProfile {
    id: StandardId::IndianCorporate,
    summary_heading: "Professional Summary",
    experience_heading: "Professional Experience",
    education_heading: "Education",
    skills_heading: "Technical Skills",
    name_color: "#4F46E5",
    heading_color: "#4F46E5",
    header_rule: "3px solid #4F46E5",
    heading_rule: "2px solid #4F46E5",
    skill_tag_bg: "#EEF2FF",
    skill_tag_border: Some("1px solid #4F46E5"),
    centered_header: false,
    contact_layout: ContactLayout::LabeledLines,
    contact_fields: &[
        ContactField { key: "email", label: "Email" },
        ContactField { key: "phone", label: "Mobile" },
        ContactField { key: "location", label: "Location" },
        ContactField { key: "current_ctc", label: "Current CTC" },
        ContactField { key: "expected_ctc", label: "Expected CTC" },
        ContactField { key: "notice_period", label: "Notice Period" },
    ],
    experience_description: false,
    education_field_of_study: false,
    education_grade: false,
    education_university: true,
    education_percentage: true,
    education_honors: false,
};

static UK_PROFESSIONAL: StandardProfile = StandardProfile {
    id: StandardId::UkProfessional,
    summary_heading: "Professional Profile",
    experience_heading: "Professional Experience",
    education_heading: "Education and Qualifications",
    skills_heading: "Key Skills",
    name_color: "#1E293B",
    heading_color: "#475569",
    header_rule: "3px solid #475569",
    heading_rule: "2px solid #475569",
    skill_tag_bg: "#F1F5F9",
    skill_tag_border: Some("1px solid #475569"),
    centered_header: false,
    contact_layout: ContactLayout::LabeledLines,
    contact_fields: &[
        ContactField { key: "email", label: "Email" },
        ContactField { key: "phone", label: "Telephone" },
        ContactField { key: "location", label: "Location" },
    ],
    experience_description: false,
    education_field_of_study: false,
    education_grade: true,
    education_university: false,
    education_percentage: false,
    education_honors: true,
};
