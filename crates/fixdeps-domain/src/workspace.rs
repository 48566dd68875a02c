//! Workspace discovery from the root manifest.

use crate::error::WorkspaceError;
use crate::fs::{MANIFEST_FILE, ProjectFs};
use crate::model::WorkspaceEntry;
use camino::Utf8Path;
use fixdeps_types::RepoPath;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceTool {
    Yarn,
    Bolt,
    /// Treat the root package itself as the only workspace when nothing else is declared.
    Root,
}

/// Directory names never descended into while expanding workspace globs.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Tools consulted when reconciling a missing dependency.
pub const DEFAULT_TOOLS: &[WorkspaceTool] = &[WorkspaceTool::Yarn, WorkspaceTool::Bolt];

impl FromStr for WorkspaceTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yarn" => Ok(WorkspaceTool::Yarn),
            "bolt" => Ok(WorkspaceTool::Bolt),
            "root" => Ok(WorkspaceTool::Root),
            other => Err(format!(
                "unknown workspace tool '{other}' (expected yarn, bolt, or root)"
            )),
        }
    }
}

/// Compiled workspace globs, relative to the project root.
///
/// Patterns prefixed with `!` exclude directories matched by the others.
#[derive(Clone, Debug)]
pub struct WorkspaceGlobs {
    include: GlobSet,
    exclude: GlobSet,
    max_depth: Option<usize>,
}

impl WorkspaceGlobs {
    pub fn new(patterns: &[String]) -> Result<Self, WorkspaceError> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        let mut max_depth = Some(0usize);

        for raw in patterns {
            let (negated, pattern) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw.as_str()),
            };
            let pattern = normalize_pattern(pattern);
            if pattern.is_empty() {
                continue;
            }

            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| WorkspaceError::Glob {
                    pattern: raw.clone(),
                    message: e.kind().to_string(),
                })?;

            if negated {
                exclude.add(glob);
                continue;
            }
            include.add(glob);
            max_depth = match max_depth {
                _ if pattern.contains("**") => None,
                Some(depth) => Some(depth.max(pattern.split('/').count())),
                None => None,
            };
        }

        let build = |b: GlobSetBuilder| {
            b.build().map_err(|e| WorkspaceError::Glob {
                pattern: patterns.join(", "),
                message: e.to_string(),
            })
        };
        Ok(Self {
            include: build(include)?,
            exclude: build(exclude)?,
            max_depth,
        })
    }

    /// Whether a directory, given relative to the project root, is selected.
    pub fn matches(&self, relative_dir: &str) -> bool {
        let rel = relative_dir.trim_end_matches('/');
        self.include.is_match(rel) && !self.exclude.is_match(rel)
    }

    /// Deepest directory level any include pattern can reach, `None` when unbounded.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

fn normalize_pattern(pattern: &str) -> &str {
    let mut p = pattern.trim();
    while let Some(rest) = p.strip_prefix("./") {
        p = rest;
    }
    p.trim_end_matches('/')
}

/// List workspace packages declared by the manifest at `root`.
///
/// Directories without a package.json are ignored. Every other matched package
/// must carry a name; otherwise the whole call fails with
/// [`WorkspaceError::MissingName`] listing each offending manifest.
pub fn discover<F: ProjectFs + ?Sized>(
    fs: &F,
    root: &Utf8Path,
    tools: &[WorkspaceTool],
) -> Result<Vec<WorkspaceEntry>, WorkspaceError> {
    let root_manifest = fs.read_manifest(&root.join(MANIFEST_FILE))?;

    let Some(patterns) = root_manifest.workspace_patterns(tools) else {
        if tools.contains(&WorkspaceTool::Root) {
            tracing::debug!(%root, "no workspaces declared; using root package");
            return Ok(vec![WorkspaceEntry {
                directory: root.to_path_buf(),
                name: root_manifest.package_name().unwrap_or_default().to_string(),
                manifest: root_manifest,
            }]);
        }
        tracing::debug!(%root, "no workspaces declared");
        return Ok(Vec::new());
    };

    let mut dirs = fs.glob_directories(root, &patterns)?;
    dirs.sort();
    dirs.dedup();

    let mut entries = Vec::new();
    let mut missing_names = Vec::new();
    for dir in dirs {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !fs.is_file(&manifest_path) {
            continue;
        }
        let manifest = fs.read_manifest(&manifest_path)?;
        match manifest.package_name() {
            Some(name) => entries.push(WorkspaceEntry {
                directory: dir.clone(),
                name: name.to_string(),
                manifest,
            }),
            None => missing_names.push(RepoPath::relative_to(root, &manifest_path)),
        }
    }

    if !missing_names.is_empty() {
        missing_names.sort();
        return Err(WorkspaceError::MissingName {
            paths: missing_names,
        });
    }

    tracing::debug!(%root, count = entries.len(), "discovered workspace packages");
    Ok(entries)
}
