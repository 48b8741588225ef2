pub mod de;
pub mod resume;
pub mod standard;

// Re-export the types the rest of the crate consumes.
pub use resume::{EducationEntry, ExperienceEntry, SkillGroup, Skills, StructuredResume};
pub use standard::StandardId;
