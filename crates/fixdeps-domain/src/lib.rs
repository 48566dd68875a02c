//! Pure dependency declaration checks (no direct IO).
//!
//! Input: import sites plus a [`ProjectFs`] port that can read manifests and list
//! workspace directories. Output: findings, optional manifest fixes, and a verdict.

#![forbid(unsafe_code)]

pub mod error;
pub mod fix;
pub mod fs;
pub mod model;
pub mod policy;
pub mod resolve;
pub mod specifier;
pub mod workspace;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{Evaluation, RunStats, evaluate};
pub use error::{ManifestError, PolicyError, WorkspaceError};
pub use fs::{ClosestManifest, MANIFEST_FILE, ProjectFs};
pub use resolve::{FileCheck, ImportSite, Ports, ResolutionVerdict, SiteKind, check_file};
