//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A manifest that would trigger a finding.
    pub before: &'static str,
    /// A manifest that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_DEPS_EXTRANEOUS => Some(explain_no_extraneous()),
        ids::CHECK_MANIFEST_READ => Some(explain_manifest_read()),
        ids::CHECK_WORKSPACE_DISCOVERY => Some(explain_workspace_discovery()),

        // Codes
        ids::CODE_MISSING_DEPENDENCY => Some(explain_missing_dependency()),
        ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED => Some(explain_dev_dependency()),
        ids::CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED => Some(explain_optional_dependency()),
        ids::CODE_MANIFEST_NOT_FOUND => Some(explain_manifest_not_found()),
        ids::CODE_MANIFEST_PARSE_ERROR => Some(explain_manifest_parse_error()),
        ids::CODE_WORKSPACE_INVALID => Some(explain_workspace_invalid()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_DEPS_EXTRANEOUS,
        ids::CHECK_MANIFEST_READ,
        ids::CHECK_WORKSPACE_DISCOVERY,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_DEPENDENCY,
        ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED,
        ids::CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED,
        ids::CODE_MANIFEST_NOT_FOUND,
        ids::CODE_MANIFEST_PARSE_ERROR,
        ids::CODE_WORKSPACE_INVALID,
    ]
}

// --- Check-level explanations ---

fn explain_no_extraneous() -> Explanation {
    Explanation {
        title: "No Extraneous Dependencies",
        description: "\
Verifies that every external package imported or required by a source file is declared
in the nearest package.json.

Each site is checked against the manifest that owns the file:
- `dependencies` is always accepted
- `devDependencies`, `optionalDependencies` and `peerDependencies` are accepted only
  where the configuration allows them for that file
- anything else is reported as missing

In a monorepo the project root manifest and the workspace packages are consulted to
decide whether the package is already known to the project.",
        remediation: "\
Declare the package in the package.json that owns the importing file. Run
`fixdeps check --fix` to add it automatically when the version is known from the
root manifest or from a sibling workspace package.",
        examples: ExamplePair {
            before: r#"// packages/app/src/index.js
import debounce from "lodash/debounce";

// packages/app/package.json
{ "name": "app", "dependencies": {} }"#,
            after: r#"// packages/app/package.json
{ "name": "app", "dependencies": { "lodash": "^4.17.21" } }"#,
        },
    }
}

fn explain_manifest_read() -> Explanation {
    Explanation {
        title: "Manifest Readability",
        description: "\
Reports package.json files that fixdeps needed but could not use, either because the
file does not exist at a configured `package_dir` or because it is not valid JSON.

These findings are attached to the top of the source file (line 0) because they
are not tied to a single import site. Dependency checks for that file continue with
an empty set of declarations.",
        remediation: "\
Fix the JSON syntax of the manifest, or correct the `package_dir` setting so it points
at directories that contain a package.json.",
        examples: ExamplePair {
            before: r#"{ "name": "app", "dependencies": { "lodash": "^4.0.0", } }"#,
            after: r#"{ "name": "app", "dependencies": { "lodash": "^4.0.0" } }"#,
        },
    }
}

fn explain_workspace_discovery() -> Explanation {
    Explanation {
        title: "Workspace Discovery",
        description: "\
Workspace packages are discovered from the root package.json, using `workspaces`
(a list of globs, or an object with a `packages` list) or `bolt.workspaces`.

Every discovered workspace package must have a `name`. When one does not, discovery
fails as a whole so that no check is made against a partial workspace list.",
        remediation: "\
Add a `name` field to every package.json listed in the error, or narrow the workspace
globs so they no longer match those directories.",
        examples: ExamplePair {
            before: r#"// packages/tools/package.json
{ "version": "1.0.0" }"#,
            after: r#"// packages/tools/package.json
{ "name": "@acme/tools", "version": "1.0.0" }"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_missing_dependency() -> Explanation {
    Explanation {
        title: "Missing Dependency",
        description: "\
The imported package is not declared in any dependency map of the nearest package.json.

The message distinguishes two cases:
- \"should be listed in the package's dependencies\": the project root declares the
  package, or it is a sibling workspace package, so only the owning package is missing it
- \"should be listed in the project and package's dependencies\": nothing in the project
  declares it yet",
        remediation: "\
Add the package to `dependencies` of the owning package.json. `react` and `react-dom`
are added to both `peerDependencies` and `devDependencies` instead. With `--fix`,
fixdeps writes the version declared at the root, or `^<version>` of the matching
workspace package; it never guesses a version.",
        examples: ExamplePair {
            before: r#"// package.json (root)
{ "private": true, "workspaces": ["packages/*"], "dependencies": { "lodash": "^4.0.0" } }

// packages/a/package.json
{ "name": "a" }"#,
            after: r#"// packages/a/package.json
{ "name": "a", "dependencies": { "lodash": "^4.0.0" } }"#,
        },
    }
}

fn explain_dev_dependency() -> Explanation {
    Explanation {
        title: "Dev Dependency Used At Runtime",
        description: "\
The imported package is declared only in `devDependencies`, but the configuration does
not allow dev dependencies for this file.

Dev dependencies are not installed for consumers of a published package, so runtime
code that imports them fails once installed elsewhere.",
        remediation: "\
Move the package from `devDependencies` to `dependencies`, or allow dev dependencies for
files such as tests with `dev_dependencies = [\"**/*.test.js\"]`.",
        examples: ExamplePair {
            before: r#"{ "name": "app", "devDependencies": { "chalk": "^5.0.0" } }"#,
            after: r#"{ "name": "app", "dependencies": { "chalk": "^5.0.0" } }"#,
        },
    }
}

fn explain_optional_dependency() -> Explanation {
    Explanation {
        title: "Optional Dependency Used Unconditionally",
        description: "\
The imported package is declared only in `optionalDependencies`, but the configuration
does not allow optional dependencies for this file.

Optional dependencies may be absent after install, so unguarded imports can fail.",
        remediation: "\
Move the package to `dependencies`, or allow optional dependencies for the files that
guard their imports.",
        examples: ExamplePair {
            before: r#"{ "name": "app", "optionalDependencies": { "fsevents": "^2.0.0" } }"#,
            after: r#"{ "name": "app", "dependencies": { "fsevents": "^2.0.0" } }"#,
        },
    }
}

fn explain_manifest_not_found() -> Explanation {
    Explanation {
        title: "Manifest Not Found",
        description: "\
A directory configured through `package_dir` has no package.json.",
        remediation: "\
Point `package_dir` at directories that contain a package.json, or remove the setting
to use the nearest package.json of each file.",
        examples: ExamplePair {
            before: r#"package_dir = ["packages/missing"]"#,
            after: r#"package_dir = ["packages/app"]"#,
        },
    }
}

fn explain_manifest_parse_error() -> Explanation {
    Explanation {
        title: "Manifest Parse Error",
        description: "\
A package.json needed for this file is not valid JSON. Checks for the file continue
as if the manifest declared no dependencies.",
        remediation: "\
Fix the JSON syntax. Trailing commas and comments are not allowed in package.json.",
        examples: ExamplePair {
            before: r#"{ "name": "app", }"#,
            after: r#"{ "name": "app" }"#,
        },
    }
}

fn explain_workspace_invalid() -> Explanation {
    Explanation {
        title: "Invalid Workspace",
        description: "\
Workspace discovery failed while deciding how to report a missing dependency, most
often because a workspace package.json has no `name`. The site could not be evaluated.",
        remediation: "\
Add the missing `name` fields listed in the message and re-run fixdeps.",
        examples: ExamplePair {
            before: r#"{ "version": "1.0.0" }"#,
            after: r#"{ "name": "tools", "version": "1.0.0" }"#,
        },
    }
}
