//! Restandard — resume standardization core.
//!
//! Converts free-text resume content into a standardized [`StructuredResume`]
//! record (via the AI conversion collaborator) and renders that record into
//! downloadable documents: a styled markup document (preview and PDF source)
//! and a DOCX package. Rendering and composition are pure, synchronous and
//! stateless; the same record and standard always produce identical bytes.
//!
//! Routing, rate limiting, CORS and upload parsing belong to the HTTP edge,
//! not to this crate. The boundary types ([`AppError`], [`download::Attachment`])
//! implement `IntoResponse` so edge handlers can return them directly.

pub mod compose;
pub mod config;
pub mod convert;
pub mod download;
pub mod errors;
pub mod models;
pub mod render;
pub mod state;
pub mod transcode;

pub use config::Config;
pub use errors::AppError;
pub use models::resume::StructuredResume;
pub use models::standard::StandardId;
pub use state::AppState;
