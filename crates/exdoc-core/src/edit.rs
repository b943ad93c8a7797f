//! Documentation comment rendering and edit planning.
//!
//! Turns a [`ThrowCandidate`] into the single [`TextEdit`] that documents the
//! thrown exception. Where the comment lands is decided by [`Placement`]:
//!
//! - [`Placement::AboveThrow`]: a new line directly above the throw statement
//! - [`Placement::ReplaceLine`]: the throw line itself is overwritten
//! - [`Placement::MemberDocs`]: a new line at the end of the enclosing member's
//!   doc comment block, above any attributes
//!
//! Every placement emits the same comment text, rendered by
//! [`render_exception_comment`]. The inserting placements check the `///`
//! lines directly above the insertion point first and return
//! [`EditPlan::AlreadyDocumented`] when they already name the exception.
//! Inserted lines reuse the document's line terminator.

use crate::candidate::ThrowCandidate;
use crate::declarations::{locate_enclosing_class, locate_enclosing_member};
use crate::detector::ThrowDetector;
use crate::error::{ExdocError, Result};
use crate::lines::{LineIndex, leading_whitespace};
use serde::Deserialize;
use tower_lsp_server::ls_types::{Position, Range, TextEdit};

/// Where the generated comment is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Insert the comment on a new line above the throw statement.
    #[default]
    AboveThrow,
    /// Overwrite the throw line with the comment.
    ReplaceLine,
    /// Add the comment to the enclosing method's doc comment block.
    MemberDocs,
}

/// Result of planning a documentation edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditPlan {
    /// Apply this edit to the candidate's document.
    Edit(TextEdit),
    /// The exception is already documented where the comment would go.
    AlreadyDocumented {
        member: String,
        exception_type: String,
    },
}

/// Renders the XML doc comment for `exception_type`.
///
/// # Examples
///
/// ```
/// use exdoc_core::edit::render_exception_comment;
///
/// assert_eq!(
///     render_exception_comment("ArgumentNullException"),
///     r#"/// <exception cref="ArgumentNullException"></exception>"#
/// );
/// ```
pub fn render_exception_comment(exception_type: &str) -> String {
    format!("/// <exception cref=\"{exception_type}\"></exception>")
}

/// Plans the edit documenting `candidate` within `content`.
///
/// `content` must be the current text of the candidate's document. The
/// exception type comes from `candidate.throw_text`, not from `content`.
///
/// # Errors
///
/// Returns [`ExdocError::LineOutOfRange`] if the candidate's line does not
/// exist in `content`.
pub fn plan_documentation_edit(
    content: &str,
    candidate: &ThrowCandidate,
    placement: Placement,
    detector: &dyn ThrowDetector,
) -> Result<EditPlan> {
    let lines = LineIndex::new(content);
    let line = candidate.line_number;
    let throw_line = lines.line(line).ok_or(ExdocError::LineOutOfRange {
        line,
        line_count: lines.line_count(),
    })?;

    let exception_type = detector.exception_type(&candidate.throw_text);
    let comment = render_exception_comment(&exception_type);
    let eol = lines.line_ending(line);

    let edit = match placement {
        Placement::ReplaceLine => TextEdit {
            range: candidate.range,
            new_text: comment,
        },
        Placement::AboveThrow => {
            if doc_block_mentions(&lines, line, &exception_type) {
                return Ok(already_documented_at_throw(&lines, line, exception_type));
            }
            insert_line_above(line, leading_whitespace(throw_line), &comment, eol)
        }
        Placement::MemberDocs => {
            let floor = class_floor(&lines, line);

            let Some(member) = locate_enclosing_member(&lines, line, floor) else {
                tracing::debug!(
                    "no member declaration above line {}, documenting at the throw",
                    line
                );
                if doc_block_mentions(&lines, line, &exception_type) {
                    return Ok(already_documented_at_throw(&lines, line, exception_type));
                }
                return Ok(EditPlan::Edit(insert_line_above(
                    line,
                    leading_whitespace(throw_line),
                    &comment,
                    eol,
                )));
            };

            let insert_at = first_attribute_line(&lines, member.line, floor);
            if doc_block_mentions(&lines, insert_at, &exception_type) {
                return Ok(EditPlan::AlreadyDocumented {
                    member: member.name,
                    exception_type,
                });
            }

            let indent = lines.line(member.line).map_or("", leading_whitespace);
            insert_line_above(insert_at, indent, &comment, eol)
        }
    };

    Ok(EditPlan::Edit(edit))
}

/// First line a member lookup for `line` may inspect.
fn class_floor(lines: &LineIndex<'_>, line: u32) -> u32 {
    locate_enclosing_class(lines, line).map_or(0, |class| {
        tracing::trace!(
            "throw at line {} is inside {} (line {})",
            line,
            class.statement,
            class.start_line
        );
        class.start_line
    })
}

/// The comment directly above the throw already names the exception.
fn already_documented_at_throw(
    lines: &LineIndex<'_>,
    line: u32,
    exception_type: String,
) -> EditPlan {
    let member = locate_enclosing_member(lines, line, class_floor(lines, line))
        .map_or_else(|| format!("Line {}", line + 1), |member| member.name);
    tracing::debug!(
        "{} already documents {} above the throw",
        member,
        exception_type
    );
    EditPlan::AlreadyDocumented {
        member,
        exception_type,
    }
}

fn insert_line_above(line: u32, indent: &str, comment: &str, eol: &str) -> TextEdit {
    let at = Position::new(line, 0);
    TextEdit {
        range: Range::new(at, at),
        new_text: format!("{indent}{comment}{eol}"),
    }
}

/// Walks up from a member declaration over its attribute lines.
fn first_attribute_line(lines: &LineIndex<'_>, member_line: u32, floor: u32) -> u32 {
    let mut first = member_line;
    while first > floor {
        let Some(text) = lines.line(first - 1) else {
            break;
        };
        let trimmed = text.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            first -= 1;
        } else {
            break;
        }
    }
    first
}

/// Checks the `///` block ending just above `line` for an existing `cref`.
fn doc_block_mentions(lines: &LineIndex<'_>, line: u32, exception_type: &str) -> bool {
    let needle = format!("cref=\"{exception_type}\"");
    let is_doc_line = |text: &&str| text.trim_start().starts_with("///");
    (0..line)
        .rev()
        .map_while(|current| lines.line(current).filter(is_doc_line))
        .any(|text| text.contains(&needle))
}
