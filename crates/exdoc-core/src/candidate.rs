use crate::detector::ThrowDetector;
use crate::error::{ExdocError, Result};
use crate::lines::LineIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_lsp_server::ls_types::{Range, Uri};

/// A line holding a throw statement, captured when a code action is offered.
///
/// Serialized as the single argument of the documentation command, so it
/// makes a round trip through the client between the code action request and
/// the command execution. The document may have changed in between; see
/// [`ThrowCandidate::is_current`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowCandidate {
    pub uri: Uri,
    pub line_number: u32,
    /// Raw text of the line, without its terminator.
    pub throw_text: String,
    /// Span of the whole line.
    pub range: Range,
}

impl ThrowCandidate {
    /// Builds a candidate for `line` if the detector recognises a throw there.
    pub fn detect(
        uri: &Uri,
        lines: &LineIndex<'_>,
        line: u32,
        detector: &dyn ThrowDetector,
    ) -> Option<Self> {
        let text = lines.line(line)?;
        if !detector.is_throw(text) {
            return None;
        }

        Some(Self {
            uri: uri.clone(),
            line_number: line,
            throw_text: text.to_string(),
            range: crate::lines::line_span(line, text),
        })
    }

    /// Decodes a candidate from `workspace/executeCommand` arguments.
    pub fn from_arguments(arguments: &[Value]) -> Result<Self> {
        let arg = arguments
            .first()
            .ok_or(ExdocError::MissingArgument("candidate"))?;
        Ok(serde_json::from_value(arg.clone())?)
    }

    /// Returns true if the candidate's line still holds the captured text.
    pub fn is_current(&self, lines: &LineIndex<'_>) -> bool {
        lines.line(self.line_number) == Some(self.throw_text.as_str())
    }
}
