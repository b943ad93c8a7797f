//! Command registration lifecycle.
//!
//! The server advertises its commands statically in `initialize`, but only
//! answers to the ones registered for the current session. Registration
//! happens in `initialize` and is undone in `shutdown`, so a command that
//! arrives after shutdown is rejected instead of editing a document.

use dashmap::DashSet;

/// LSP command identifiers.
pub mod commands {
    /// Command that writes the exception doc comment for a throw statement.
    pub const GENERATE_EXCEPTION_DOC: &str = "exdoc-lsp.generateExceptionDoc";

    /// Every command the server can register.
    pub const ALL: &[&str] = &[GENERATE_EXCEPTION_DOC];
}

/// Set of commands the server currently answers to.
///
/// # Examples
///
/// ```
/// use exdoc_lsp::registration::{CommandRegistry, commands};
///
/// let registry = CommandRegistry::new();
/// registry.register_all();
/// assert!(registry.is_registered(commands::GENERATE_EXCEPTION_DOC));
///
/// registry.unregister_all();
/// assert!(!registry.is_registered(commands::GENERATE_EXCEPTION_DOC));
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    active: DashSet<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every known command.
    pub fn register_all(&self) {
        for &command in commands::ALL {
            if self.active.insert(command) {
                tracing::debug!("registered command {}", command);
            }
        }
    }

    /// Unregisters every command. Safe to call more than once.
    pub fn unregister_all(&self) {
        for &command in commands::ALL {
            if self.active.remove(command).is_some() {
                tracing::debug!("unregistered command {}", command);
            }
        }
    }

    pub fn is_registered(&self, command: &str) -> bool {
        self.active.contains(command)
    }

    /// Registered command identifiers, sorted.
    pub fn registered(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.active.iter().map(|id| *id).collect();
        ids.sort_unstable();
        ids
    }
}
