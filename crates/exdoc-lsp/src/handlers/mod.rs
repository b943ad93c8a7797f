//! LSP protocol handlers.
//!
//! - [`code_actions`]: offers the "Generate XML documentation for exception"
//!   quick fix on throw lines
//! - [`commands`]: runs the documentation command and sends the edit
//!
//! Handlers degrade gracefully: a request that cannot be answered yields an
//! empty result, and failures the user should see are reported through
//! `window/showMessage`.

pub mod code_actions;
pub mod commands;
