//! The `workspaces` use case: list the packages a project root declares.

use camino::Utf8Path;
use fixdeps_domain::workspace::WorkspaceTool;
use fixdeps_types::RepoPath;
use serde::Serialize;

/// One discovered workspace package, relative to the project root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkspaceListing {
    pub name: String,
    pub directory: RepoPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Discover workspace packages under `project_root` using the given tools.
///
/// Fails when the root manifest is unreadable or a member is nameless.
pub fn run_workspaces(
    project_root: &Utf8Path,
    tools: &[WorkspaceTool],
) -> anyhow::Result<Vec<WorkspaceListing>> {
    let entries = fixdeps_repo::discover_workspaces(project_root, tools)?;
    tracing::debug!(root = %project_root, count = entries.len(), "listed workspaces");

    Ok(entries
        .into_iter()
        .map(|entry| WorkspaceListing {
            directory: RepoPath::relative_to(project_root, &entry.directory),
            version: entry.manifest.version.clone(),
            name: entry.name,
        })
        .collect())
}
