//! Core data structures for Lodestone.
//!
//! This module contains the foundational value types:
//! - Probe requests (candidate lists, requirements, overrides)
//! - Probe results and exported variables
//! - The dependency manifest and candidate derivation

pub mod request;
pub mod result;
pub mod spec;

pub use request::{ProbeOverride, ProbeRequest, Requirement};
pub use result::ProbeResult;
pub use spec::{find_manifest, DependencySpec, Manifest, MANIFEST_NAME};
