//! Core logic for exdoc.
//!
//! This crate holds everything that does not depend on the LSP transport:
//! recognising throw statements, finding the declarations around them, and
//! planning the text edit that documents the thrown exception.
//!
//! # Architecture
//!
//! exdoc-core defines:
//! - **Detection**: the [`ThrowDetector`] trait and its regex implementation
//! - **Lines**: [`LineIndex`] for line lookups with UTF-16 ranges
//! - **Declarations**: upward scans for the enclosing class and member
//! - **Edits**: [`Placement`] and [`plan_documentation_edit`]
//! - **Error Types**: [`ExdocError`]
//!
//! # Examples
//!
//! ```
//! use exdoc_core::{
//!     EditPlan, LineIndex, Placement, RegexThrowDetector, ThrowCandidate,
//!     plan_documentation_edit,
//! };
//! use tower_lsp_server::ls_types::Uri;
//!
//! let source = "void Run()\n{\n    throw new TimeoutException();\n}";
//! let uri = Uri::from_file_path("/src/Run.cs").unwrap();
//!
//! let candidate =
//!     ThrowCandidate::detect(&uri, &LineIndex::new(source), 2, &RegexThrowDetector).unwrap();
//! let plan =
//!     plan_documentation_edit(source, &candidate, Placement::AboveThrow, &RegexThrowDetector)
//!         .unwrap();
//!
//! let EditPlan::Edit(edit) = plan else { unreachable!() };
//! assert_eq!(
//!     edit.new_text,
//!     "    /// <exception cref=\"TimeoutException\"></exception>\n"
//! );
//! ```

pub mod candidate;
pub mod declarations;
pub mod detector;
pub mod edit;
pub mod error;
pub mod lines;

// Re-export commonly used types
pub use candidate::ThrowCandidate;
pub use declarations::{
    ClassDeclarationInfo, MemberDeclarationInfo, locate_enclosing_class, locate_enclosing_member,
};
pub use detector::{RegexThrowDetector, ThrowDetector};
pub use edit::{EditPlan, Placement, plan_documentation_edit, render_exception_comment};
pub use error::{ExdocError, Result};
pub use lines::LineIndex;
