//! The closed set of presentation standards.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The four supported presentation standards.
///
/// Unrecognized identifiers parse to [`StandardId::UsAts`] — the documented
/// default presentation, never an error. That holds for [`StandardId::parse`]
/// and for serde deserialization alike, so an unknown value arriving in a
/// request payload degrades gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardId {
    #[default]
    UsAts,
    Europass,
    IndianCorporate,
    UkProfessional,
}

impl StandardId {
    pub const ALL: [StandardId; 4] = [
        StandardId::UsAts,
        StandardId::Europass,
        StandardId::IndianCorporate,
        StandardId::UkProfessional,
    ];

    /// Parses a wire identifier, falling back to `UsAts` for anything
    /// unrecognized.
    pub fn parse(value: &str) -> Self {
        match value {
            "us_ats" => StandardId::UsAts,
            "europass" => StandardId::Europass,
            "indian_corporate" => StandardId::IndianCorporate,
            "uk_professional" => StandardId::UkProfessional,
            _ => StandardId::UsAts,
        }
    }

    /// The wire identifier, also used in attachment filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardId::UsAts => "us_ats",
            StandardId::Europass => "europass",
            StandardId::IndianCorporate => "indian_corporate",
            StandardId::UkProfessional => "uk_professional",
        }
    }

    /// Human-readable standard name.
    pub fn display_name(&self) -> &'static str {
        match self {
            StandardId::UsAts => "US ATS-Friendly",
            StandardId::Europass => "European (EUROPASS)",
            StandardId::IndianCorporate => "Indian Corporate",
            StandardId::UkProfessional => "UK Professional",
        }
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StandardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StandardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(StandardId::parse(&raw))
    }
}
