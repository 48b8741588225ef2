//! Markup renderer — structured resume + standard → standalone styled HTML.
//!
//! One algorithm over the per-standard [`StandardProfile`] records. The
//! output embeds its stylesheet and references no external resources, so it
//! doubles as the PDF transcoding source.
//!
//! # Structural rules
//! - Fixed section order: header → summary → experience → education → skills.
//! - A section emits its heading iff its data is non-empty after defensive
//!   shape-checking; a missing optional field suppresses only its own line.
//! - Every interpolated value is escaped — no exceptions, dates included.

use crate::models::resume::{present, EducationEntry, ExperienceEntry, Skills, StructuredResume};
use crate::models::standard::StandardId;
use crate::render::escape::escape_html;
use crate::render::profile::{profile, ContactLayout, StandardProfile};

/// Renders the complete markup document for one resume.
///
/// Pure and deterministic: the same input and standard always produce
/// byte-identical output. Malformed optional data degrades by omission and
/// never fails the render.
pub fn render_html(resume: &StructuredResume, standard: StandardId) -> String {
    let p = profile(standard);
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    push_stylesheet(p, &mut out);
    out.push_str("</head>\n<body>\n");

    push_header(resume, p, &mut out);
    push_summary(resume, p, &mut out);
    push_experience(resume, p, &mut out);
    push_education(resume, p, &mut out);
    push_skills(resume, p, &mut out);

    out.push_str("</body>\n</html>\n");
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ────────────────────────────────────────────────────────────────────────────

fn push_stylesheet(p: &StandardProfile, out: &mut String) {
    let header_align = if p.centered_header {
        "text-align: center;\n  "
    } else {
        ""
    };
    let skill_border = match p.skill_tag_border {
        Some(border) => format!("\n  border: {border};"),
        None => String::new(),
    };
    out.push_str(&format!(
        r#"<style>
body {{
  font-family: Arial, sans-serif;
  max-width: 8.5in;
  margin: 0 auto;
  padding: 0.5in;
  color: #333;
  line-height: 1.6;
}}
header {{
  {header_align}border-bottom: {header_rule};
  padding-bottom: 20px;
  margin-bottom: 30px;
}}
h1 {{
  font-size: 28px;
  margin: 10px 0;
  color: {name_color};
}}
.contact-info {{
  font-size: 12px;
  color: #666;
  margin-top: 10px;
}}
.contact-info span {{
  margin: 0 10px;
}}
section {{
  margin-bottom: 25px;
}}
h2 {{
  font-size: 18px;
  color: {heading_color};
  border-bottom: {heading_rule};
  padding-bottom: 5px;
  margin-bottom: 15px;
}}
h3 {{
  font-size: 14px;
  margin: 10px 0 5px;
}}
.item {{
  margin-bottom: 20px;
}}
.item-header {{
  display: flex;
  justify-content: space-between;
  margin-bottom: 5px;
}}
.item-title {{
  font-weight: bold;
  font-size: 16px;
}}
.item-org {{
  font-weight: 600;
  color: #555;
}}
.item-meta {{
  font-size: 12px;
  color: #666;
}}
.item-side {{
  font-size: 12px;
  color: #666;
  text-align: right;
}}
ul {{
  margin: 10px 0;
  padding-left: 20px;
}}
li {{
  margin: 5px 0;
}}
.skill-group {{
  margin-bottom: 10px;
}}
.skills {{
  display: flex;
  flex-wrap: wrap;
  gap: 8px;
}}
.skill-tag {{
  background-color: {skill_tag_bg};
  padding: 4px 12px;
  border-radius: 4px;
  font-size: 12px;{skill_border}
}}
@media print {{
  body {{
    padding: 0;
  }}
}}
</style>
"#,
        header_align = header_align,
        header_rule = p.header_rule,
        name_color = p.name_color,
        heading_color = p.heading_color,
        heading_rule = p.heading_rule,
        skill_tag_bg = p.skill_tag_bg,
        skill_border = skill_border,
    ));
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn push_header(resume: &StructuredResume, p: &StandardProfile, out: &mut String) {
    out.push_str("<header>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(resume.full_name())));

    // Only the fields actually present contribute; absent fields leave no
    // stray separator behind.
    let fields: Vec<(&str, &str)> = p
        .contact_fields
        .iter()
        .filter_map(|f| resume.info(f.key).map(|v| (f.label, v)))
        .collect();

    if !fields.is_empty() {
        out.push_str("<div class=\"contact-info\">");
        match p.contact_layout {
            ContactLayout::InlineSpans => {
                for (_, value) in &fields {
                    out.push_str(&format!("<span>{}</span>", escape_html(value)));
                }
            }
            ContactLayout::LabeledLines => {
                let lines: Vec<String> = fields
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, escape_html(value)))
                    .collect();
                out.push_str(&lines.join("<br>"));
            }
        }
        out.push_str("</div>\n");
    }
    out.push_str("</header>\n");
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn push_summary(resume: &StructuredResume, p: &StandardProfile, out: &mut String) {
    let summary = resume.summary.trim();
    if summary.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<section>\n<h2>{}</h2>\n<p>{}</p>\n</section>\n",
        p.summary_heading,
        escape_html(summary)
    ));
}

fn push_experience(resume: &StructuredResume, p: &StandardProfile, out: &mut String) {
    if resume.experience.is_empty() {
        return;
    }
    out.push_str(&format!("<section>\n<h2>{}</h2>\n", p.experience_heading));
    for entry in &resume.experience {
        push_experience_item(entry, p, out);
    }
    out.push_str("</section>\n");
}

fn push_experience_item(entry: &ExperienceEntry, p: &StandardProfile, out: &mut String) {
    out.push_str("<div class=\"item\">\n<div class=\"item-header\">\n<div>\n");
    if let Some(title) = present(&entry.title) {
        out.push_str(&format!(
            "<div class=\"item-title\">{}</div>\n",
            escape_html(title)
        ));
    }
    if let Some(company) = present(&entry.company) {
        out.push_str(&format!(
            "<div class=\"item-org\">{}</div>\n",
            escape_html(company)
        ));
    }
    if p.experience_description {
        if let Some(description) = present(&entry.description) {
            out.push_str(&format!(
                "<div class=\"item-meta\">{}</div>\n",
                escape_html(description)
            ));
        }
    }
    out.push_str("</div>\n<div class=\"item-side\">\n");
    if let Some(location) = present(&entry.location) {
        out.push_str(&format!("<div>{}</div>\n", escape_html(location)));
    }
    if let Some(range) = entry.date_range() {
        out.push_str(&format!("<div>{}</div>\n", escape_html(&range)));
    }
    out.push_str("</div>\n</div>\n");

    let achievements: Vec<&str> = entry
        .achievements
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if !achievements.is_empty() {
        out.push_str("<ul>\n");
        for achievement in achievements {
            out.push_str(&format!("<li>{}</li>\n", escape_html(achievement)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}

fn push_education(resume: &StructuredResume, p: &StandardProfile, out: &mut String) {
    if resume.education.is_empty() {
        return;
    }
    out.push_str(&format!("<section>\n<h2>{}</h2>\n", p.education_heading));
    for entry in &resume.education {
        push_education_item(entry, p, out);
    }
    out.push_str("</section>\n");
}

fn push_education_item(entry: &EducationEntry, p: &StandardProfile, out: &mut String) {
    out.push_str("<div class=\"item\">\n<div class=\"item-header\">\n<div>\n");
    if let Some(degree) = present(&entry.degree) {
        out.push_str(&format!(
            "<div class=\"item-title\">{}</div>\n",
            escape_html(degree)
        ));
    }
    if p.education_field_of_study {
        if let Some(field) = present(&entry.field_of_study) {
            out.push_str(&format!("<div class=\"item-meta\">{}</div>\n", escape_html(field)));
        }
    }
    if let Some(institution) = present(&entry.institution) {
        out.push_str(&format!(
            "<div class=\"item-org\">{}</div>\n",
            escape_html(institution)
        ));
    }
    if p.education_university {
        if let Some(university) = present(&entry.university) {
            out.push_str(&format!("<div class=\"item-meta\">{}</div>\n", escape_html(university)));
        }
    }
    if let Some(location) = present(&entry.location) {
        out.push_str(&format!("<div class=\"item-meta\">{}</div>\n", escape_html(location)));
    }
    out.push_str("</div>\n<div class=\"item-side\">\n");
    if let Some(date) = present(&entry.graduation_date) {
        out.push_str(&format!("<div>{}</div>\n", escape_html(date)));
    }
    if p.education_grade {
        if let Some(grade) = present(&entry.grade) {
            out.push_str(&format!("<div>{}</div>\n", escape_html(grade)));
        }
    }
    if p.education_percentage {
        if let Some(percentage) = present(&entry.percentage) {
            out.push_str(&format!("<div>{}</div>\n", escape_html(percentage)));
        }
    }
    if p.education_honors {
        if let Some(honors) = present(&entry.honors) {
            out.push_str(&format!("<div>{}</div>\n", escape_html(honors)));
        }
    }
    out.push_str("</div>\n</div>\n</div>\n");
}

fn push_skills(resume: &StructuredResume, p: &StandardProfile, out: &mut String) {
    if resume.skills.is_empty() {
        return;
    }
    out.push_str(&format!("<section>\n<h2>{}</h2>\n", p.skills_heading));
    match &resume.skills {
        Skills::Plain(items) => push_tag_row(items, out),
        Skills::Categorized(groups) => {
            for group in groups {
                if group.items.is_empty() {
                    continue;
                }
                out.push_str("<div class=\"skill-group\">\n");
                let category = group.category.trim();
                if !category.is_empty() {
                    out.push_str(&format!("<h3>{}</h3>\n", escape_html(category)));
                }
                push_tag_row(&group.items, out);
                out.push_str("</div>\n");
            }
        }
        Skills::Bucketed {
            technical,
            soft_skills,
        } => {
            for (label, items) in [("Technical", technical), ("Soft Skills", soft_skills)] {
                if items.is_empty() {
                    continue;
                }
                out.push_str(&format!(
                    "<div class=\"skill-group\">\n<h3>{label}</h3>\n"
                ));
                push_tag_row(items, out);
                out.push_str("</div>\n");
            }
        }
    }
    out.push_str("</section>\n");
}

fn push_tag_row(items: &[String], out: &mut String) {
    out.push_str("<div class=\"skills\">\n");
    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<span class=\"skill-tag\">{}</span>\n",
            escape_html(item)
        ));
    }
    out.push_str("</div>\n");
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
