//! Code actions handler implementation.
//!
//! Offers a single quick fix on lines that throw a new exception:
//! "Generate XML documentation for exception". The action carries no edit of
//! its own; it runs the documentation command with the captured
//! [`ThrowCandidate`] as argument.

use crate::config::ExdocConfig;
use crate::document::{ServerState, ensure_document_loaded};
use crate::registration::commands;
use exdoc_core::ThrowCandidate;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp_server::Client;
use tower_lsp_server::ls_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, CodeActionParams, Command,
};

/// Title of the quick fix shown to the user.
pub const ACTION_TITLE: &str = "Generate XML documentation for exception";

/// Handles code action requests.
///
/// Loads the document from disk first if the client never opened it.
/// Gracefully degrades by returning an empty vec when no action applies.
pub async fn handle_code_actions(
    state: Arc<ServerState>,
    params: CodeActionParams,
    client: Client,
    config: Arc<RwLock<ExdocConfig>>,
) -> Vec<CodeActionOrCommand> {
    let uri = &params.text_document.uri;

    if !ensure_document_loaded(uri, Arc::clone(&state), client, config).await {
        tracing::warn!("Document not found for code actions: {:?}", uri);
        return vec![];
    }

    build_code_actions(&state, &params)
}

/// Builds the quick fix for the line at the start of the requested range.
pub fn build_code_actions(
    state: &ServerState,
    params: &CodeActionParams,
) -> Vec<CodeActionOrCommand> {
    if !quickfix_requested(params.context.only.as_deref()) {
        tracing::debug!("quickfix excluded by context.only filter");
        return vec![];
    }

    let uri = &params.text_document.uri;
    let line = params.range.start.line;

    let candidate = {
        let Some(doc) = state.get_document(uri) else {
            return vec![];
        };
        ThrowCandidate::detect(uri, &doc.lines(), line, state.detector.as_ref())
    };

    let Some(candidate) = candidate else {
        return vec![];
    };

    let argument = match serde_json::to_value(&candidate) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("failed to encode throw candidate: {}", e);
            return vec![];
        }
    };

    tracing::debug!("offering exception doc action at {:?}:{}", uri, line);

    vec![CodeActionOrCommand::CodeAction(CodeAction {
        title: ACTION_TITLE.into(),
        kind: Some(CodeActionKind::QUICKFIX),
        command: Some(Command {
            title: ACTION_TITLE.into(),
            command: commands::GENERATE_EXCEPTION_DOC.into(),
            arguments: Some(vec![argument]),
        }),
        ..Default::default()
    })]
}

/// Returns true if `only` admits quick fixes.
///
/// A requested kind matches when it equals `quickfix` or is one of its
/// parents in the dotted hierarchy.
fn quickfix_requested(only: Option<&[CodeActionKind]>) -> bool {
    let Some(kinds) = only else {
        return true;
    };

    let quickfix = CodeActionKind::QUICKFIX;
    let quickfix = quickfix.as_str();
    kinds.iter().any(|kind| {
        let kind = kind.as_str();
        kind.is_empty()
            || quickfix == kind
            || quickfix
                .strip_prefix(kind)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}
