use crate::registration::CommandRegistry;
use dashmap::DashMap;
use exdoc_core::{LineIndex, RegexThrowDetector, ThrowDetector};
use std::sync::Arc;
use tower_lsp_server::ls_types::Uri;

/// State for a single open document.
///
/// The server only ever reads lines from the text; edits are sent to the
/// client and come back as a `didChange` notification with the new content.
///
/// # Examples
///
/// ```
/// use exdoc_lsp::document::DocumentState;
///
/// let state = DocumentState::new("csharp".into(), 1, "class A\n{\n}".into());
/// assert_eq!(state.lines().line_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Language identifier sent by the client ("csharp"), or empty for
    /// documents loaded from disk
    pub language_id: String,
    /// Document version from the last open/change notification
    pub version: i32,
    /// Full document text
    pub content: String,
}

impl DocumentState {
    pub fn new(language_id: String, version: i32, content: String) -> Self {
        Self {
            language_id,
            version,
            content,
        }
    }

    /// Line index over the current content.
    pub fn lines(&self) -> LineIndex<'_> {
        LineIndex::new(&self.content)
    }
}

/// Global server state.
///
/// Manages all open documents, the throw detector, and the registry of
/// commands the server currently answers to.
///
/// # Examples
///
/// ```
/// use exdoc_lsp::document::ServerState;
///
/// let state = ServerState::new();
/// assert_eq!(state.document_count(), 0);
/// ```
pub struct ServerState {
    /// Open documents by URI
    pub documents: DashMap<Uri, DocumentState>,
    /// Throw statement detector used by code actions and commands
    pub detector: Arc<dyn ThrowDetector>,
    /// Commands registered for the current session
    pub commands: CommandRegistry,
}

impl ServerState {
    /// Creates a new server state with the regex throw detector.
    pub fn new() -> Self {
        Self::with_detector(Arc::new(RegexThrowDetector))
    }

    /// Creates a new server state with a custom throw detector.
    pub fn with_detector(detector: Arc<dyn ThrowDetector>) -> Self {
        Self {
            documents: DashMap::new(),
            detector,
            commands: CommandRegistry::new(),
        }
    }

    /// Retrieves document state by URI.
    ///
    /// The reference holds a lock on the internal map, so it should be
    /// dropped as soon as possible.
    pub fn get_document(
        &self,
        uri: &Uri,
    ) -> Option<dashmap::mapref::one::Ref<'_, Uri, DocumentState>> {
        self.documents.get(uri)
    }

    /// Retrieves a cloned copy of document state by URI.
    ///
    /// Use this before awaiting on the client so the map lock is released.
    pub fn get_document_clone(&self, uri: &Uri) -> Option<DocumentState> {
        self.documents.get(uri).map(|doc| doc.clone())
    }

    /// Updates or inserts document state.
    pub fn update_document(&self, uri: Uri, state: DocumentState) {
        self.documents.insert(uri, state);
    }

    /// Removes document state and returns the removed entry.
    pub fn remove_document(&self, uri: &Uri) -> Option<(Uri, DocumentState)> {
        self.documents.remove(uri)
    }

    /// Returns the number of open documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("documents_count", &self.documents.len())
            .field("commands", &self.commands)
            .finish()
    }
}
