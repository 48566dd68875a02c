//! Config parsing and profile/preset resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings,
//! with every relative path resolved against an explicit base directory.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{AllowanceSetting, FixdepsConfigV1, PathSetting};
pub use presets::{Preset, preset};
pub use resolve::{Overrides, ResolvedConfig, normalize_path};

use camino::Utf8Path;

/// Parse `fixdeps.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<FixdepsConfigV1> {
    let cfg: FixdepsConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + rule options).
///
/// `base_dir` is the directory relative paths in `cfg` are resolved against,
/// normally the directory holding the config file.
pub fn resolve_config(
    cfg: FixdepsConfigV1,
    overrides: Overrides,
    base_dir: &Utf8Path,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides, base_dir)
}
