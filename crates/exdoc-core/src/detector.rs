//! Throw statement detection.
//!
//! Detection sits behind the [`ThrowDetector`] trait so the edit planning in
//! [`crate::edit`] never depends on how a throw statement is recognised. The
//! shipped implementation, [`RegexThrowDetector`], looks at one line at a time
//! and only understands the single-line `throw new FooException(...)` form.

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognises throw statements and names the exception they construct.
pub trait ThrowDetector: Send + Sync {
    /// Returns true if `line` contains a throw statement worth documenting.
    fn is_throw(&self, line: &str) -> bool;

    /// Extracts the thrown exception type name from `line`.
    ///
    /// Returns an empty string when no type can be extracted. Callers render
    /// the comment regardless, so this never fails.
    fn exception_type(&self, line: &str) -> String;
}

// Identifier characters are ASCII only
static THROW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"throw new (?-u:\w)*Exception\(").unwrap());

static EXCEPTION_TYPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"throw new ((?-u:\w)*Exception)\(").unwrap());

/// Line-based detector for `throw new <Ident>Exception(` statements.
///
/// # Examples
///
/// ```
/// use exdoc_core::detector::{RegexThrowDetector, ThrowDetector};
///
/// let detector = RegexThrowDetector;
/// let line = "throw new ArgumentNullException(nameof(x));";
///
/// assert!(detector.is_throw(line));
/// assert_eq!(detector.exception_type(line), "ArgumentNullException");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexThrowDetector;

impl ThrowDetector for RegexThrowDetector {
    fn is_throw(&self, line: &str) -> bool {
        THROW_PATTERN.is_match(line)
    }

    fn exception_type(&self, line: &str) -> String {
        EXCEPTION_TYPE_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}
