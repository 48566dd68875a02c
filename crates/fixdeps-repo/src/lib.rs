//! Repository adapters: read manifests, expand workspace globs, locate installed
//! modules, and write manifest fixes.
//!
//! This crate is allowed to do filesystem IO. It does not spawn processes; import
//! sites arrive pre-extracted as JSON.

#![forbid(unsafe_code)]

mod disk;
mod fix;
mod resolver;
mod sites;

use anyhow::Context;
use camino::Utf8Path;
use fixdeps_domain::model::WorkspaceEntry;
use fixdeps_domain::workspace::{self, WorkspaceTool};

pub use disk::DiskFs;
pub use fix::write_manifest_fix;
pub use resolver::NodeModulesResolver;
pub use sites::{load_import_sites, parse_import_sites};

/// Discover workspace packages declared by the package.json at `project_root`.
pub fn discover_workspaces(
    project_root: &Utf8Path,
    tools: &[WorkspaceTool],
) -> anyhow::Result<Vec<WorkspaceEntry>> {
    workspace::discover(&DiskFs, project_root, tools)
        .with_context(|| format!("discover workspaces under {project_root}"))
}
