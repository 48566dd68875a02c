use crate::error::{ManifestError, WorkspaceError};
use crate::model::{Manifest, parse_manifest};
use camino::{Utf8Path, Utf8PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// Read-only view of the project tree.
///
/// The domain never touches the disk itself; adapters implement this port.
pub trait ProjectFs {
    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String>;

    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Absolute directories below `root` matching the workspace globs.
    ///
    /// Order and duplicates are not significant; callers sort and dedupe.
    fn glob_directories(
        &self,
        root: &Utf8Path,
        patterns: &[String],
    ) -> Result<Vec<Utf8PathBuf>, WorkspaceError>;

    fn read_manifest(&self, path: &Utf8Path) -> Result<Manifest, ManifestError> {
        let text = self.read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        parse_manifest(path, &text)
    }

    /// Nearest `package.json` at or above `from`.
    fn closest_manifest(&self, from: &Utf8Path) -> Result<Option<ClosestManifest>, ManifestError> {
        for dir in from.ancestors() {
            let path = dir.join(MANIFEST_FILE);
            if self.is_file(&path) {
                let manifest = self.read_manifest(&path)?;
                return Ok(Some(ClosestManifest { path, manifest }));
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClosestManifest {
    pub path: Utf8PathBuf,
    pub manifest: Manifest,
}

impl ClosestManifest {
    pub fn directory(&self) -> &Utf8Path {
        self.path.parent().unwrap_or(&self.path)
    }
}
