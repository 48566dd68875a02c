//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_DEPS_EXTRANEOUS: &str = "deps.no_extraneous";
pub const CHECK_MANIFEST_READ: &str = "manifest.read";
pub const CHECK_WORKSPACE_DISCOVERY: &str = "workspace.discovery";

// Codes: deps.no_extraneous
pub const CODE_MISSING_DEPENDENCY: &str = "missing_dependency";
pub const CODE_DEV_DEPENDENCY_NOT_ALLOWED: &str = "dev_dependency_not_allowed";
pub const CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED: &str = "optional_dependency_not_allowed";

// Codes: manifest.read
pub const CODE_MANIFEST_NOT_FOUND: &str = "manifest_not_found";
pub const CODE_MANIFEST_PARSE_ERROR: &str = "manifest_parse_error";

// Codes: workspace.discovery
pub const CODE_WORKSPACE_INVALID: &str = "workspace_invalid";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
