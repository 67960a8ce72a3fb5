pub mod outline;
pub mod render;

use docs_view_core::config::Config;
use docs_view_core::{DocumentLoader, LoadedDocument};
use std::path::PathBuf;

/// Loads from `candidates`, or from the configured candidates when none are given.
async fn load_document(candidates: &[PathBuf], config: &Config) -> LoadedDocument {
    let candidates = if candidates.is_empty() {
        config.document.candidates.as_slice()
    } else {
        candidates
    };

    let document = DocumentLoader::new(candidates.iter().cloned()).load().await;
    if document.is_fallback() {
        tracing::warn!("No document found, rendering the fallback document");
    }
    document
}
