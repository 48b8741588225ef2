//! The standard-agnostic structured resume record.
//!
//! One instance is built per conversion request, consumed once by the
//! renderers, and discarded. The conversion collaborator validates that the
//! five top-level sections exist before this type is constructed, but the
//! shapes underneath them are untrusted AI output — deserialization is
//! lenient throughout (see [`crate::models::de`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::de;

/// Fallback header label used when `personal_info.full_name` is absent.
/// The only place a placeholder is permitted; every other missing field
/// suppresses its own line instead.
pub const DEFAULT_NAME: &str = "Your Name";

// ────────────────────────────────────────────────────────────────────────────
// StructuredResume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredResume {
    #[serde(default, deserialize_with = "de::string_map")]
    pub personal_info: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "de::entry_vec")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "de::entry_vec")]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Skills,
}

impl StructuredResume {
    /// True when the record carries no content at all. Empty input is
    /// rejected by the download layer before any rendering begins.
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_empty()
            && self.summary.trim().is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
    }

    /// The display name for the document header, falling back to
    /// [`DEFAULT_NAME`].
    pub fn full_name(&self) -> &str {
        self.info("full_name").unwrap_or(DEFAULT_NAME)
    }

    /// A `personal_info` value, if present and non-blank.
    pub fn info(&self, key: &str) -> Option<&str> {
        self.personal_info
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Returns the field value when present and non-blank, trimmed.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Joins a date pair into a display range. One-sided ranges render the
/// present side alone; a fully absent range renders nothing at all — no
/// dangling separator, no placeholder.
pub(crate) fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start.to_string()),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience and education entries
// ────────────────────────────────────────────────────────────────────────────

/// One work-history entry, in the order the conversion produced it.
/// The renderers never re-sort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub start_date: Option<String>,
    /// A date string or the literal token `Present`.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::string_vec")]
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    pub fn date_range(&self) -> Option<String> {
        date_range(present(&self.start_date), present(&self.end_date))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub graduation_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub field_of_study: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub percentage: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub honors: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Skill data in the three shapes the conversion model is known to emit.
///
/// The shape is resolved exactly once, here at the deserialization boundary;
/// both renderers branch on the resolved variant instead of re-inspecting
/// raw JSON at each use site. An unrecognized shape resolves to the empty
/// plain list and contributes nothing downstream (including no heading).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Skills {
    /// Flat list of skill names.
    Plain(Vec<String>),
    /// `{category, items}` groups (EUROPASS-flavoured output).
    Categorized(Vec<SkillGroup>),
    /// `{technical, soft_skills}` buckets (Indian-corporate-flavoured output).
    Bucketed {
        technical: Vec<String>,
        soft_skills: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "de::skill_list")]
    pub items: Vec<String>,
}

impl Default for Skills {
    fn default() -> Self {
        Skills::Plain(Vec::new())
    }
}

impl Skills {
    /// True when no variant carries any skill string. Groups with empty
    /// item lists count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Skills::Plain(items) => items.is_empty(),
            Skills::Categorized(groups) => groups.iter().all(|g| g.items.is_empty()),
            Skills::Bucketed {
                technical,
                soft_skills,
            } => technical.is_empty() && soft_skills.is_empty(),
        }
    }

    /// Every skill string in original order, category labels dropped.
    ///
    /// The DOCX composer joins this into one comma-separated paragraph
    /// regardless of the original shape, so categorized and bucketed skills
    /// survive the word-processing path instead of being dropped.
    pub fn flattened(&self) -> Vec<&str> {
        match self {
            Skills::Plain(items) => items.iter().map(String::as_str).collect(),
            Skills::Categorized(groups) => groups
                .iter()
                .flat_map(|g| g.items.iter().map(String::as_str))
                .collect(),
            Skills::Bucketed {
                technical,
                soft_skills,
            } => technical
                .iter()
                .chain(soft_skills.iter())
                .map(String::as_str)
                .collect(),
        }
    }

    /// Resolves whatever shape the model produced.
    fn from_value(value: &Value) -> Skills {
        match value {
            Value::Array(items) => {
                let groups: Vec<SkillGroup> = items
                    .iter()
                    .filter_map(|item| {
                        let obj = item.as_object()?;
                        if !obj.contains_key("category") && !obj.contains_key("items") {
                            return None;
                        }
                        serde_json::from_value(item.clone()).ok()
                    })
                    .collect();
                if !groups.is_empty() {
                    return Skills::Categorized(groups);
                }
                Skills::Plain(de::skill_strings(items))
            }
            Value::Object(map)
                if map.contains_key("technical") || map.contains_key("soft_skills") =>
            {
                Skills::Bucketed {
                    technical: bucket(map.get("technical")),
                    soft_skills: bucket(map.get("soft_skills")),
                }
            }
            _ => Skills::Plain(Vec::new()),
        }
    }
}

fn bucket(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| de::skill_strings(items))
        .unwrap_or_default()
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(de)?;
        Ok(Skills::from_value(&value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> StructuredResume {
        serde_json::from_value(value).expect("lenient parse must not fail")
    }

    // ── top-level leniency ──────────────────────────────────────────────────

    #[test]
    fn test_malformed_sections_degrade_to_empty() {
        let resume = parse(json!({
            "personal_info": "not an object",
            "summary": 42,
            "experience": {"oops": true},
            "education": null,
            "skills": 7
        }));
        assert!(resume.personal_info.is_empty());
        assert_eq!(resume.summary, "42");
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.skills.is_empty());
        assert!(!resume.is_empty(), "coerced summary still counts as content");
    }

    #[test]
    fn test_personal_info_drops_nested_values() {
        let resume = parse(json!({
            "personal_info": {
                "full_name": "Jane Doe",
                "age": 34,
                "links": {"github": "x"},
                "email": "   "
            },
            "summary": "", "experience": [], "education": [], "skills": []
        }));
        assert_eq!(resume.full_name(), "Jane Doe");
        assert_eq!(resume.info("age"), Some("34"));
        assert_eq!(resume.info("links"), None);
        assert_eq!(resume.info("email"), None, "blank values are absent");
    }

    #[test]
    fn test_full_name_falls_back_to_default() {
        let resume = StructuredResume::default();
        assert_eq!(resume.full_name(), DEFAULT_NAME);
        assert!(resume.is_empty());
    }

    #[test]
    fn test_malformed_entry_is_skipped_not_fatal() {
        let resume = parse(json!({
            "personal_info": {}, "summary": "", "education": [], "skills": [],
            "experience": [
                {"title": "Engineer", "company": "Acme"},
                "just a string",
                {"title": 123, "achievements": ["Shipped", 5, ""]}
            ]
        }));
        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.experience[0].title.as_deref(), Some("Engineer"));
        // Non-string title coerces; non-scalar achievements are dropped.
        assert_eq!(resume.experience[1].title.as_deref(), Some("123"));
        assert_eq!(resume.experience[1].achievements, vec!["Shipped", "5"]);
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let resume = parse(json!({
            "personal_info": {}, "summary": "", "education": [], "skills": [],
            "experience": [
                {"title": "Third"}, {"title": "First"}, {"title": "Second"}
            ]
        }));
        let titles: Vec<_> = resume
            .experience
            .iter()
            .filter_map(|e| e.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Third", "First", "Second"]);
    }

    // ── date ranges ─────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_both_present() {
        assert_eq!(
            date_range(Some("01/2020"), Some("Present")),
            Some("01/2020 - Present".to_string())
        );
    }

    #[test]
    fn test_date_range_one_sided_has_no_separator() {
        assert_eq!(date_range(Some("2020"), None), Some("2020".to_string()));
        assert_eq!(date_range(None, Some("2022")), Some("2022".to_string()));
        assert_eq!(date_range(None, None), None);
    }

    // ── skills shapes ───────────────────────────────────────────────────────

    #[test]
    fn test_skills_plain_list() {
        let skills: Skills = serde_json::from_value(json!(["Python", "Go"])).unwrap();
        assert_eq!(
            skills,
            Skills::Plain(vec!["Python".to_string(), "Go".to_string()])
        );
        assert_eq!(skills.flattened(), vec!["Python", "Go"]);
    }

    #[test]
    fn test_skills_categorized_groups() {
        let skills: Skills = serde_json::from_value(json!([
            {"category": "Languages", "items": ["Rust", "Python"]},
            {"category": "Tools", "items": ["Docker"]}
        ]))
        .unwrap();
        match &skills {
            Skills::Categorized(groups) => {
                assert_eq!(groups.len(), 2);
                assert_eq!(groups[0].category, "Languages");
            }
            other => panic!("expected Categorized, got {other:?}"),
        }
        assert_eq!(skills.flattened(), vec!["Rust", "Python", "Docker"]);
    }

    #[test]
    fn test_skills_bucketed_mapping() {
        let skills: Skills = serde_json::from_value(json!({
            "technical": ["Rust", "SQL"],
            "soft_skills": ["Mentoring"]
        }))
        .unwrap();
        assert_eq!(skills.flattened(), vec!["Rust", "SQL", "Mentoring"]);
        assert!(!skills.is_empty());
    }

    #[test]
    fn test_skills_unrecognized_shape_is_empty() {
        let skills: Skills = serde_json::from_value(json!({"levels": [1, 2]})).unwrap();
        assert!(skills.is_empty());
        let skills: Skills = serde_json::from_value(json!("Rust, Go")).unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn test_skills_plain_list_drops_non_strings() {
        let skills: Skills =
            serde_json::from_value(json!(["Python", 3, null, "Go"])).unwrap();
        assert_eq!(skills.flattened(), vec!["Python", "Go"]);
    }

    #[test]
    fn test_skills_categorized_all_groups_empty_is_empty() {
        let skills: Skills =
            serde_json::from_value(json!([{"category": "Tools", "items": []}])).unwrap();
        assert!(skills.is_empty());
    }
}
