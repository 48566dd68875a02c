use sha2::{Digest, Sha256};

/// Stable SHA-256 fingerprint for a finding.
///
/// Identity fields: check_id, code, source path (project-relative), and the
/// package name when the finding concerns one.
pub fn fingerprint_for_site(
    check_id: &str,
    code: &str,
    source_path: &str,
    package: Option<&str>,
) -> String {
    let mut parts = vec![check_id, code, source_path];
    if let Some(p) = package {
        parts.push(p);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
