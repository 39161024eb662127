//! Lodestone - a locator for native C/C++ library dependencies
//!
//! This crate provides the core library functionality for Lodestone:
//! declarative dependency manifests, filesystem probing with
//! first-match-wins candidate search, and session-scoped caching of probe
//! outcomes.

pub mod core;
pub mod probe;
pub mod util;

/// Test utilities and mocks for Lodestone unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory filesystem that counts
/// accesses.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    request::ProbeOverride, request::ProbeRequest, request::Requirement, result::ProbeResult,
    spec::DependencySpec, spec::Manifest,
};

pub use crate::probe::{CachedOutcome, ProbeCache, Prober};
pub use crate::util::context::GlobalContext;
