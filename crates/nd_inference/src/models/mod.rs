use std::sync::Arc;
use nd_core::{Error, Result, Summarizer};
use tracing::debug;

pub mod frequency;
pub mod lead;

pub use frequency::FrequencySummarizer;
pub use lead::LeadSummarizer;

const AVAILABLE_MODELS: &[&str] = &["frequency", "lead"];

/// Build a summarizer by name; `None` selects the frequency model.
pub fn create_model(name: Option<&str>) -> Result<Arc<dyn Summarizer>> {
    let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("frequency");
    debug!(model = name, "creating summarizer");
    match name.to_ascii_lowercase().as_str() {
        "frequency" => Ok(Arc::new(FrequencySummarizer::new())),
        "lead" => Ok(Arc::new(LeadSummarizer::new())),
        other => Err(Error::Config(format!(
            "unknown summarizer {other:?}, available: {}",
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
