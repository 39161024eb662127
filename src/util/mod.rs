//! Shared utilities: configuration, diagnostics, context, and shell output.

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod shell;

pub use context::GlobalContext;
