//! Command implementations

pub mod cache;
pub mod check;
pub mod completions;
pub mod locate;
