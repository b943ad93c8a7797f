//! Document open/change handling and cold start loading.

use super::loader::{is_file_uri, load_document_from_disk};
use super::state::{DocumentState, ServerState};
use crate::config::ExdocConfig;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp_server::Client;
use tower_lsp_server::ls_types::{MessageType, Uri};

/// Stores a newly opened document if the configuration tracks it.
///
/// Returns true if the document was stored.
pub fn handle_document_open(
    state: &ServerState,
    config: &ExdocConfig,
    uri: Uri,
    language_id: String,
    version: i32,
    content: String,
) -> bool {
    if !config.tracks(Some(language_id.as_str()), &uri) {
        tracing::debug!("untracked document {:?} (language {})", uri, language_id);
        return false;
    }

    state.update_document(uri, DocumentState::new(language_id, version, content));
    true
}

/// Replaces the content of a tracked document.
///
/// Changes for documents that were never stored are ignored, which keeps
/// untracked languages out of the store.
pub fn handle_document_change(state: &ServerState, uri: &Uri, version: i32, content: String) {
    match state.documents.get_mut(uri) {
        Some(mut doc) => {
            doc.version = version;
            doc.content = content;
        }
        None => {
            tracing::debug!("change for untracked document {:?}", uri);
        }
    }
}

/// Ensures a document is loaded, falling back to disk for cold starts.
///
/// Returns true if the document is available in state afterwards.
pub async fn ensure_document_loaded(
    uri: &Uri,
    state: Arc<ServerState>,
    client: Client,
    config: Arc<RwLock<ExdocConfig>>,
) -> bool {
    if state.get_document(uri).is_some() {
        return true;
    }

    // Clone config before async operations to release lock
    let config = { config.read().await.clone() };

    if !config.cold_start.enabled {
        tracing::debug!("Cold start disabled via configuration");
        return false;
    }

    if !is_file_uri(uri) {
        tracing::debug!("Cold start skipped for non-file URI: {:?}", uri);
        return false;
    }

    if !config.tracks_extension(uri) {
        tracing::debug!("Unsupported file type: {:?}", uri);
        return false;
    }

    tracing::info!("Loading document from disk (cold start): {:?}", uri);
    let content = match load_document_from_disk(uri).await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to load document {:?}: {}", uri, e);
            client
                .log_message(MessageType::WARNING, format!("Could not load file: {e}"))
                .await;
            return false;
        }
    };

    // A didOpen may have raced the disk read; the client's copy wins
    state
        .documents
        .entry(uri.clone())
        .or_insert_with(|| DocumentState::new(String::new(), 0, content));
    true
}
