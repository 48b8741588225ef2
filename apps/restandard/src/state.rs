use std::sync::Arc;

use crate::config::Config;
use crate::convert::client::AnthropicClient;
use crate::convert::{ConversionService, LlmConverter};
use crate::transcode::{PdfTranscoder, WeasyPrintTranscoder};

/// Shared application state, built once at startup and cloned into handlers
/// by the HTTP edge.
///
/// Collaborators are constructed here, explicitly, and held behind trait
/// objects so deployments and tests can swap them. No module keeps a lazily
/// initialized global.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub converter: Arc<dyn ConversionService>,
    pub transcoder: Arc<dyn PdfTranscoder>,
}

impl AppState {
    /// Wires the default collaborators from configuration: the Anthropic
    /// conversion client and the WeasyPrint availability probe.
    pub fn from_config(config: Config) -> Self {
        let converter = LlmConverter::new(AnthropicClient::new(config.anthropic_api_key.clone()));
        let transcoder = WeasyPrintTranscoder::discover(config.weasyprint_bin.clone());
        Self {
            config,
            converter: Arc::new(converter),
            transcoder: Arc::new(transcoder),
        }
    }
}
