use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_domain::ProjectFs;
use fixdeps_domain::WorkspaceError;
use fixdeps_domain::workspace::{IGNORED_DIRS, WorkspaceGlobs};
use walkdir::WalkDir;

/// [`ProjectFs`] over the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFs;

impl ProjectFs for DiskFs {
    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn glob_directories(
        &self,
        root: &Utf8Path,
        patterns: &[String],
    ) -> Result<Vec<Utf8PathBuf>, WorkspaceError> {
        let globs = WorkspaceGlobs::new(patterns)?;

        let mut walker = WalkDir::new(root).min_depth(1);
        if let Some(depth) = globs.max_depth() {
            walker = walker.max_depth(depth);
        }

        let mut out = Vec::new();
        let entries = walker.into_iter().filter_entry(|e| {
            !(e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .is_some_and(|name| IGNORED_DIRS.contains(&name)))
        });
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(%root, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(path) = pathbuf_to_utf8(entry.into_path()) else {
                continue;
            };
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            if globs.matches(&rel.as_str().replace('\\', "/")) {
                out.push(path);
            }
        }

        out.sort();
        Ok(out)
    }
}

fn pathbuf_to_utf8(path: std::path::PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
