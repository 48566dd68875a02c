//! Stable DTOs and IDs used across the fixdeps workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - canonical project-relative path handling
//! - manifest fix payloads
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod fix;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use fix::{DependencyCategory, DependencyInsertion, ManifestFix};
pub use path::RepoPath;
pub use receipt::{
    Finding, FixdepsData, FixdepsReport, Location, ReportEnvelope, SCHEMA_REPORT_V1, Severity,
    ToolMeta, Verdict,
};
