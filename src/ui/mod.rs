//! UI layer: plain-text rendering of the chat list for the CLI.

pub mod chat_list;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
