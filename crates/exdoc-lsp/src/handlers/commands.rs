//! `workspace/executeCommand` handler for the documentation command.
//!
//! The command receives the [`ThrowCandidate`] captured by the code action,
//! checks it against the current document text, plans the edit and sends it
//! to the client with `workspace/applyEdit`. Problems the user should know
//! about are reported with `window/showMessage`.

use crate::config::ExdocConfig;
use crate::document::{ServerState, ensure_document_loaded};
use exdoc_core::{EditPlan, Placement, ThrowCandidate, plan_documentation_edit};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp_server::Client;
use tower_lsp_server::jsonrpc::{Error, Result};
use tower_lsp_server::ls_types::{MessageType, WorkspaceEdit};

/// What the documentation command should do for a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentationOutcome {
    /// Send this edit to the client.
    Apply {
        edit: WorkspaceEdit,
        exception_type: String,
    },
    /// The exception is already documented where the comment would go.
    AlreadyDocumented {
        member: String,
        exception_type: String,
    },
    /// The candidate's line no longer holds the captured throw statement.
    Stale,
    /// The candidate's document is not available.
    DocumentNotFound,
}

/// Decides the outcome of the documentation command for `candidate`.
///
/// Holds the document lock only while planning; nothing here awaits.
pub fn prepare_documentation(
    state: &ServerState,
    candidate: &ThrowCandidate,
    placement: Placement,
) -> exdoc_core::Result<DocumentationOutcome> {
    let Some(doc) = state.get_document(&candidate.uri) else {
        return Ok(DocumentationOutcome::DocumentNotFound);
    };

    if !candidate.is_current(&doc.lines()) {
        return Ok(DocumentationOutcome::Stale);
    }

    let plan = plan_documentation_edit(
        &doc.content,
        candidate,
        placement,
        state.detector.as_ref(),
    )?;

    Ok(match plan {
        EditPlan::Edit(text_edit) => {
            let mut changes = HashMap::new();
            changes.insert(candidate.uri.clone(), vec![text_edit]);
            DocumentationOutcome::Apply {
                edit: WorkspaceEdit {
                    changes: Some(changes),
                    ..Default::default()
                },
                exception_type: state.detector.exception_type(&candidate.throw_text),
            }
        }
        EditPlan::AlreadyDocumented {
            member,
            exception_type,
        } => DocumentationOutcome::AlreadyDocumented {
            member,
            exception_type,
        },
    })
}

/// Executes the documentation command.
///
/// # Errors
///
/// Returns an `invalid_params` error if the arguments do not hold a
/// candidate. Every later failure is reported to the user instead.
pub async fn execute_generate_documentation(
    state: Arc<ServerState>,
    client: Client,
    config: Arc<RwLock<ExdocConfig>>,
    arguments: &[Value],
) -> Result<Option<Value>> {
    let candidate = ThrowCandidate::from_arguments(arguments).map_err(|e| {
        tracing::warn!("rejecting documentation command: {}", e);
        Error::invalid_params(format!("Invalid throw candidate: {e}"))
    })?;

    tracing::info!(
        "documenting exception at {:?}:{}",
        candidate.uri,
        candidate.line_number
    );

    ensure_document_loaded(
        &candidate.uri,
        Arc::clone(&state),
        client.clone(),
        Arc::clone(&config),
    )
    .await;

    let placement = { config.read().await.placement };

    let outcome = match prepare_documentation(&state, &candidate, placement) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("failed to plan documentation edit: {}", e);
            client
                .show_message(
                    MessageType::WARNING,
                    format!("Could not document exception: {e}"),
                )
                .await;
            return Ok(None);
        }
    };

    match outcome {
        DocumentationOutcome::Apply {
            edit,
            exception_type,
        } => match client.apply_edit(edit).await {
            Ok(response) if response.applied => {
                tracing::info!("documented {}", exception_type);
            }
            Ok(response) => {
                let reason = response
                    .failure_reason
                    .unwrap_or_else(|| "no reason given".into());
                tracing::warn!("client rejected documentation edit: {}", reason);
                client
                    .show_message(
                        MessageType::WARNING,
                        format!("Could not document {exception_type}: {reason}"),
                    )
                    .await;
            }
            Err(e) => {
                tracing::error!("Failed to apply edit: {:?}", e);
                client
                    .show_message(
                        MessageType::WARNING,
                        format!("Could not document {exception_type}: {}", e.message),
                    )
                    .await;
            }
        },
        DocumentationOutcome::AlreadyDocumented {
            member,
            exception_type,
        } => {
            tracing::debug!("{} already documents {}", member, exception_type);
            client
                .show_message(
                    MessageType::INFO,
                    format!("{member} already documents {exception_type}"),
                )
                .await;
        }
        DocumentationOutcome::Stale => {
            tracing::warn!(
                "line {} of {:?} changed since the action was offered",
                candidate.line_number,
                candidate.uri
            );
            client
                .show_message(
                    MessageType::WARNING,
                    "The throw statement changed since the action was offered; request the action again",
                )
                .await;
        }
        DocumentationOutcome::DocumentNotFound => {
            tracing::warn!("document not found: {:?}", candidate.uri);
            client
                .show_message(
                    MessageType::WARNING,
                    "Could not document exception: the document is not open",
                )
                .await;
        }
    }

    Ok(None)
}
