use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_domain::fix::apply_fix;
use fixdeps_types::ManifestFix;

/// Apply `fix` to the manifest on disk, re-reading it first.
///
/// Returns the absolute path written.
pub fn write_manifest_fix(project_root: &Utf8Path, fix: &ManifestFix) -> anyhow::Result<Utf8PathBuf> {
    let path = project_root.join(fix.manifest.as_str());
    let original = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
    let updated = apply_fix(&path, &original, fix)?;
    std::fs::write(&path, updated).with_context(|| format!("write {path}"))?;
    tracing::info!(manifest = %fix.manifest, "{}", fix.describe());
    Ok(path)
}
