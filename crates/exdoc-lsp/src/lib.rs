//! Language server that documents thrown exceptions in C# sources.
//!
//! On a line such as `throw new InvalidOperationException("...")` the server
//! offers a quick fix that writes
//! `/// <exception cref="InvalidOperationException"></exception>` into the
//! document. Detection and edit planning live in `exdoc-core`; this crate
//! wires them to the Language Server Protocol.

pub mod config;
pub mod document;
pub mod handlers;
pub mod registration;
pub mod server;
mod test_utils;

// Re-export commonly used types
pub use config::ExdocConfig;
pub use server::Backend;
