//! Module specifier classification and package-name derivation.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;

/// Node.js core modules. `node:`-prefixed specifiers are builtin regardless of this list.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecifierClass {
    Builtin,
    External,
    Internal,
    Unknown,
}

pub trait SpecifierClassifier {
    fn classify(&self, specifier: &str) -> SpecifierClass;
}

/// Maps a specifier, seen from a source file, to the file it loads.
///
/// `None` means the module cannot be located; such sites are not checked.
pub trait ModuleResolver {
    fn resolve(&self, specifier: &str, from_file: &Utf8Path) -> Option<Utf8PathBuf>;
}

/// Resolver that treats every specifier as installed.
///
/// Useful when sites come from a bundler report that already dropped unresolved imports.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeResolved;

impl ModuleResolver for AssumeResolved {
    fn resolve(&self, specifier: &str, _from_file: &Utf8Path) -> Option<Utf8PathBuf> {
        Some(Utf8PathBuf::from(specifier))
    }
}

/// Classifier following Node's resolution conventions.
#[derive(Clone, Debug, Default)]
pub struct NodeClassifier {
    extra_core: BTreeSet<String>,
}

impl NodeClassifier {
    /// Additional names treated as builtin (e.g. `electron`).
    pub fn with_core_modules<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra_core: names.into_iter().map(Into::into).collect(),
        }
    }

    fn is_builtin(&self, specifier: &str) -> bool {
        if specifier.starts_with("node:") {
            return true;
        }
        let base = package_name(specifier);
        NODE_BUILTINS.contains(&specifier)
            || NODE_BUILTINS.contains(&base)
            || self.extra_core.contains(specifier)
            || self.extra_core.contains(base)
    }
}

impl SpecifierClassifier for NodeClassifier {
    fn classify(&self, specifier: &str) -> SpecifierClass {
        if specifier.is_empty() {
            return SpecifierClass::Unknown;
        }
        if is_relative_or_absolute(specifier) {
            return SpecifierClass::Internal;
        }
        if self.is_builtin(specifier) {
            return SpecifierClass::Builtin;
        }
        if is_scoped(specifier) || specifier.starts_with(is_word_char) {
            return SpecifierClass::External;
        }
        SpecifierClass::Unknown
    }
}

fn is_relative_or_absolute(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `@scope/name` with non-empty scope and name.
fn is_scoped(specifier: &str) -> bool {
    let Some(rest) = specifier.strip_prefix('@') else {
        return false;
    };
    match rest.split_once('/') {
        Some((scope, name)) => !scope.is_empty() && !name.is_empty(),
        None => false,
    }
}

/// Package a specifier belongs to.
///
/// `@scope/name/sub` is `@scope/name`; `name/sub/path` is `name`.
pub fn package_name(specifier: &str) -> &str {
    if specifier.starts_with('@') {
        match specifier.match_indices('/').nth(1) {
            Some((idx, _)) => &specifier[..idx],
            None => specifier,
        }
    } else {
        specifier.split('/').next().unwrap_or(specifier)
    }
}
