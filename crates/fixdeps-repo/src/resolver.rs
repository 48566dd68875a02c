use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_domain::specifier::{ModuleResolver, package_name};

/// Locates packages the way Node does: `node_modules/<package>` in the importing
/// file's directory or any of its ancestors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeModulesResolver;

impl ModuleResolver for NodeModulesResolver {
    fn resolve(&self, specifier: &str, from_file: &Utf8Path) -> Option<Utf8PathBuf> {
        let package = package_name(specifier);
        let start = from_file.parent()?;
        start
            .ancestors()
            .map(|dir| dir.join("node_modules").join(package))
            .find(|candidate| candidate.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_packages_installed_in_an_ancestor() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8");
        std::fs::create_dir_all(root.join("node_modules/@scope/pkg")).expect("mkdir");
        std::fs::create_dir_all(root.join("node_modules/lodash")).expect("mkdir");
        let file = root.join("packages/app/src/index.js");

        let resolved = NodeModulesResolver
            .resolve("lodash/debounce", &file)
            .expect("resolved");
        assert_eq!(resolved, root.join("node_modules/lodash"));
        assert!(NodeModulesResolver.resolve("@scope/pkg/sub", &file).is_some());
        assert!(NodeModulesResolver.resolve("left-pad", &file).is_none());
    }
}
