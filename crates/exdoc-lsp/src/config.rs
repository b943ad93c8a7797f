use exdoc_core::Placement;
use serde::Deserialize;
use serde_json::Value;
use tower_lsp_server::ls_types::Uri;

/// Root configuration for the exdoc-lsp server.
///
/// Provided by the client through initialization options, and updated through
/// `workspace/didChangeConfiguration`. All fields use sensible defaults if not
/// specified.
///
/// # Examples
///
/// ```
/// use exdoc_lsp::config::ExdocConfig;
/// use exdoc_core::Placement;
///
/// let json = r#"{
///     "languages": ["csharp"],
///     "placement": "member_docs"
/// }"#;
///
/// let config: ExdocConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.placement, Placement::MemberDocs);
/// assert_eq!(config.extensions, vec!["cs".to_string()]);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ExdocConfig {
    /// Language identifiers (as sent in `didOpen`) the quick fix applies to.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// File extensions tracked regardless of language identifier.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_placement")]
    pub placement: Placement,
    #[serde(default)]
    pub cold_start: ColdStartConfig,
}

impl Default for ExdocConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            extensions: default_extensions(),
            placement: Placement::default(),
            cold_start: ColdStartConfig::default(),
        }
    }
}

impl ExdocConfig {
    /// Parses configuration from a `didChangeConfiguration` settings payload.
    ///
    /// Accepts both `{"exdoc": {...}}` and the bare configuration object.
    pub fn from_settings(settings: Value) -> Option<Self> {
        let value = match settings {
            Value::Object(mut map) if map.contains_key("exdoc") => map.remove("exdoc")?,
            other => other,
        };

        match serde_json::from_value(value) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring invalid exdoc settings: {}", e);
                None
            }
        }
    }

    /// Returns true if the document is one the quick fix applies to.
    pub fn tracks(&self, language_id: Option<&str>, uri: &Uri) -> bool {
        if language_id.is_some_and(|id| self.languages.iter().any(|l| l == id)) {
            return true;
        }
        self.tracks_extension(uri)
    }

    /// Returns true if the URI's file extension is configured.
    pub fn tracks_extension(&self, uri: &Uri) -> bool {
        let path = uri.path();
        let Some(filename) = path.as_str().split('/').next_back() else {
            return false;
        };
        let Some((_, extension)) = filename.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Configuration for cold start behavior.
///
/// Controls whether code action requests for documents the client never
/// opened load the file from disk.
///
/// # Defaults
///
/// - `enabled`: `true`
///
/// # Security
///
/// The file size limit (10MB) is hardcoded. See `loader::MAX_FILE_SIZE`.
#[derive(Debug, Clone, Deserialize)]
pub struct ColdStartConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ColdStartConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// Default value functions
const fn default_true() -> bool {
    true
}

fn default_languages() -> Vec<String> {
    vec!["csharp".to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["cs".to_string()]
}

/// Custom deserializer for placement that falls back to the default on
/// unknown values instead of rejecting the whole configuration.
fn deserialize_placement<'de, D>(deserializer: D) -> Result<Placement, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(
        serde_json::from_value(Value::String(raw.clone())).unwrap_or_else(|_| {
            tracing::warn!("unknown placement {:?}, using default", raw);
            Placement::default()
        }),
    )
}
