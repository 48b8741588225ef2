//! Markup rendering — the styled HTML side of document generation, used both
//! as the preview document and as the PDF transcoding source.

pub mod escape;
pub mod html;
pub mod profile;

// Re-export the public API consumed by other modules (download, transcode).
pub use escape::escape_html;
pub use html::render_html;
pub use profile::{profile, StandardProfile};
