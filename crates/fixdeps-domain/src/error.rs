use camino::Utf8PathBuf;
use fixdeps_types::RepoPath;

/// Failure to obtain a usable manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: Utf8PathBuf, message: String },

    #[error("failed to read {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            ManifestError::NotFound { path }
            | ManifestError::Parse { path, .. }
            | ManifestError::Io { path, .. } => path,
        }
    }
}

/// Failure of a whole workspace discovery call.
///
/// Discovery never returns partial results: any of these aborts it.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error(
        "The following package.jsons are missing the \"name\" field:\n{}",
        join_paths(.paths)
    )]
    MissingName { paths: Vec<RepoPath> },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("invalid workspace glob {pattern:?}: {message}")]
    Glob { pattern: String, message: String },

    #[error("failed to list workspace directories under {root}: {message}")]
    Walk { root: Utf8PathBuf, message: String },
}

/// Invalid rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid {option} glob {pattern:?}: {message}")]
    InvalidGlob {
        option: &'static str,
        pattern: String,
        message: String,
    },
}

fn join_paths(paths: &[RepoPath]) -> String {
    paths
        .iter()
        .map(RepoPath::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
