use anyhow::Context;
use camino::Utf8Path;
use fixdeps_domain::ImportSite;

/// Read the traversal output: a JSON array of import sites.
pub fn load_import_sites(path: &Utf8Path) -> anyhow::Result<Vec<ImportSite>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    parse_import_sites(&text).with_context(|| format!("parse {path}"))
}

pub fn parse_import_sites(text: &str) -> anyhow::Result<Vec<ImportSite>> {
    let sites: Vec<ImportSite> = serde_json::from_str(text)?;
    Ok(sites)
}
