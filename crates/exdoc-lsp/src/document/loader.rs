//! Document loading from filesystem for cold start scenarios.
//!
//! A client may ask for code actions on a file it never announced with
//! `didOpen`, typically right after the server restarts. Handlers then call
//! `ensure_document_loaded()`, which reads the file through this module.
//!
//! # Security
//!
//! - File size limit: 10MB
//! - Non-UTF8 files are rejected

use exdoc_core::error::{ExdocError, Result};
use tower_lsp_server::ls_types::Uri;

/// Maximum allowed file size in bytes (10MB).
const MAX_FILE_SIZE: u64 = 10_000_000;

/// Large file warning threshold (1MB).
const LARGE_FILE_THRESHOLD: u64 = 1_000_000;

/// Loads document content from disk.
///
/// # Errors
///
/// - `ExdocError::InvalidUri` - URI is not a file:// URI
/// - `ExdocError::FileTooLarge` - File exceeds the 10MB limit
/// - `ExdocError::Io` - File read error (not found, permission denied, not UTF-8)
///
/// # Examples
///
/// ```no_run
/// use exdoc_lsp::document::load_document_from_disk;
/// use tower_lsp_server::ls_types::Uri;
///
/// # async fn example() -> exdoc_core::error::Result<()> {
/// let uri = Uri::from_file_path("/path/to/Service.cs").unwrap();
/// let content = load_document_from_disk(&uri).await?;
/// println!("Loaded {} bytes", content.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_document_from_disk(uri: &Uri) -> Result<String> {
    if !is_file_uri(uri) {
        tracing::debug!("Cannot load non-file URI: {:?}", uri);
        return Err(ExdocError::InvalidUri(format!("{:?}", uri)));
    }

    let path = match uri.to_file_path() {
        Some(p) => p,
        None => {
            tracing::debug!("Cannot load non-file URI: {:?}", uri);
            return Err(ExdocError::InvalidUri(format!("{:?}", uri)));
        }
    };

    tracing::debug!("Loading document from disk: {:?}", path);

    let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::NotFound => tracing::debug!("File not found: {:?}", path),
            std::io::ErrorKind::PermissionDenied => tracing::warn!("Permission denied: {:?}", path),
            _ => tracing::error!("IO error reading metadata for {:?}: {}", path, e),
        }
        ExdocError::Io(e)
    })?;

    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        tracing::error!(
            "Document exceeds maximum size: {} bytes (limit: {} bytes)",
            size,
            MAX_FILE_SIZE
        );
        return Err(ExdocError::FileTooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }

    if size > LARGE_FILE_THRESHOLD {
        tracing::warn!("Document is large: {} bytes for {:?}", size, path);
    }

    let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            tracing::warn!("File is not valid UTF-8: {:?}", path);
        }
        ExdocError::Io(e)
    })?;

    tracing::debug!("Loaded {} bytes from {:?}", content.len(), path);
    Ok(content)
}

/// Returns true if `uri` uses the `file` scheme.
///
/// `Uri::to_file_path` also accepts relative paths of other schemes, such as
/// `untitled:Untitled-1.cs`, so the scheme has to be checked first.
pub(crate) fn is_file_uri(uri: &Uri) -> bool {
    uri.as_str()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("file:"))
}
