//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - package name derivation from specifiers
//! - category precedence in the resolution decision
//! - fix planning never inventing versions
//! - discovery determinism

use crate::engine::{RunStats, evaluate};
use crate::fix::{apply_fix, plan_fix};
use crate::model::DependencyFields;
use crate::policy::PolicyConfig;
use crate::resolve::{ResolutionVerdict, decide};
use crate::specifier::package_name;
use crate::test_support::{MemFs, permissive_config};
use crate::workspace::{DEFAULT_TOOLS, discover};
use camino::{Utf8Path, Utf8PathBuf};
use fixdeps_types::{DependencyCategory, Finding, Location, RepoPath, Severity};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9._-]{0,15}").unwrap()
}

fn arb_subpath() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 0..4)
}

fn arb_version() -> impl Strategy<Value = String> {
    (0u32..20, 0u32..50, 0u32..50).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

fn arb_policy() -> impl Strategy<Value = PolicyConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(dev, opt, peer)| PolicyConfig {
        allow_dev_deps: dev,
        allow_opt_deps: opt,
        allow_peer_deps: peer,
        project_root_dir: Utf8PathBuf::from("/repo"),
    })
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error)
    ]
}

// ============================================================================
// Package names
// ============================================================================

proptest! {
    #[test]
    fn scoped_name_survives_any_subpath(scope in arb_segment(), name in arb_segment(), sub in arb_subpath()) {
        let pkg = format!("@{scope}/{name}");
        let specifier = std::iter::once(pkg.clone()).chain(sub).collect::<Vec<_>>().join("/");
        prop_assert_eq!(package_name(&specifier), pkg.as_str());
    }

    #[test]
    fn bare_name_drops_subpath(name in arb_segment(), sub in arb_subpath()) {
        let specifier = std::iter::once(name.clone()).chain(sub).collect::<Vec<_>>().join("/");
        prop_assert_eq!(package_name(&specifier), name.as_str());
    }
}

// ============================================================================
// Resolution decision
// ============================================================================

proptest! {
    #[test]
    fn runtime_dependency_is_always_acceptable(
        name in arb_segment(),
        version in arb_version(),
        policy in arb_policy(),
        also_dev in any::<bool>(),
        also_opt in any::<bool>(),
    ) {
        let mut deps = DependencyFields::default();
        deps.dependencies.insert(name.clone(), version.clone());
        if also_dev {
            deps.dev_dependencies.insert(name.clone(), version.clone());
        }
        if also_opt {
            deps.optional_dependencies.insert(name.clone(), version);
        }
        let (verdict, category) = decide(&deps, &name, &policy);
        prop_assert_eq!(verdict, ResolutionVerdict::Acceptable);
        prop_assert_eq!(category, Some(DependencyCategory::Dependencies));
    }

    #[test]
    fn dev_only_is_acceptable_iff_allowed(name in arb_segment(), policy in arb_policy()) {
        let mut deps = DependencyFields::default();
        deps.dev_dependencies.insert(name.clone(), "1.0.0".to_string());
        let (verdict, _) = decide(&deps, &name, &policy);
        if policy.allow_dev_deps {
            prop_assert_eq!(verdict, ResolutionVerdict::Acceptable);
        } else {
            prop_assert_eq!(verdict, ResolutionVerdict::WronglyInDevDeps);
        }
    }

    #[test]
    fn undeclared_is_missing(name in arb_segment(), other in arb_segment(), policy in arb_policy()) {
        prop_assume!(name != other);
        let mut deps = DependencyFields::default();
        deps.dependencies.insert(other.clone(), "1.0.0".to_string());
        deps.dev_dependencies.insert(other, "1.0.0".to_string());
        let (verdict, category) = decide(&deps, &name, &policy);
        prop_assert_eq!(verdict, ResolutionVerdict::MissingEntirely);
        prop_assert_eq!(category, None);
    }
}

// ============================================================================
// Fix planning
// ============================================================================

proptest! {
    #[test]
    fn planner_never_fabricates_versions(name in arb_segment(), root in proptest::option::of(arb_version())) {
        let manifest = RepoPath::new("packages/a/package.json");
        let fix = plan_fix(&name, &manifest, root.as_deref(), None);
        match root {
            Some(v) => {
                let fix = fix.expect("fix with root version");
                prop_assert!(fix.insertions.iter().all(|i| i.version == v && i.name == name));
            }
            None => prop_assert!(fix.is_none()),
        }
    }

    #[test]
    fn applied_fix_declares_the_package(name in arb_segment(), version in arb_version()) {
        let manifest = RepoPath::new("package.json");
        let fix = plan_fix(&name, &manifest, Some(&version), None).expect("fix");
        let text = apply_fix(Utf8Path::new("package.json"), r#"{"name":"x"}"#, &fix).expect("apply");
        prop_assert!(text.ends_with("}\n"), "missing trailing newline");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("json");
        let category = fix.insertions[0].category.as_str();
        prop_assert_eq!(parsed[category][&name].as_str(), Some(version.as_str()));
    }
}

// ============================================================================
// Ordering and discovery determinism
// ============================================================================

proptest! {
    #[test]
    fn evaluation_order_is_input_independent(
        items in prop::collection::vec((arb_severity(), arb_segment(), 0u32..50), 0..20)
    ) {
        let findings: Vec<Finding> = items
            .iter()
            .map(|(sev, path, line)| Finding {
                severity: *sev,
                check_id: "deps.no_extraneous".to_string(),
                code: "missing_dependency".to_string(),
                message: format!("{path}:{line}"),
                location: Some(Location { path: RepoPath::new(path), line: Some(*line), col: None }),
                help: None,
                fingerprint: None,
                fix: None,
                data: serde_json::Value::Null,
            })
            .collect();
        let mut reversed = findings.clone();
        reversed.reverse();

        let cfg = permissive_config("/repo");
        let a = evaluate(findings, &cfg, RunStats::default());
        let b = evaluate(reversed, &cfg, RunStats::default());
        prop_assert_eq!(a.findings, b.findings);
        prop_assert_eq!(a.verdict, b.verdict);
    }

    #[test]
    fn discovery_is_idempotent(names in prop::collection::btree_set(arb_segment(), 0..6)) {
        let mut fs = MemFs::new().file("/repo/package.json", r#"{ "workspaces": ["packages/*"] }"#);
        for name in &names {
            fs = fs.file(
                &format!("/repo/packages/{name}/package.json"),
                &format!(r#"{{ "name": "{name}" }}"#),
            );
        }
        let first = discover(&fs, Utf8Path::new("/repo"), DEFAULT_TOOLS).expect("discover");
        let second = discover(&fs, Utf8Path::new("/repo"), DEFAULT_TOOLS).expect("discover");
        prop_assert_eq!(&first, &second);
        let found: Vec<&str> = first.iter().map(|e| e.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(found, expected);
    }
}
