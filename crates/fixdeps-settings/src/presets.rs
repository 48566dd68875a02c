use fixdeps_domain::policy::FailOn;
use fixdeps_types::Severity;

/// Profile defaults applied before the config file and CLI overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub profile: String,
    pub severity: Severity,
    pub fail_on: FailOn,
    pub max_findings: usize,
}

/// Preset profiles are opinionated defaults. Unknown names fall back to `strict`.
pub fn preset(profile: &str) -> Preset {
    match profile {
        "warn" => Preset {
            profile: "warn".to_string(),
            severity: Severity::Warning,
            fail_on: FailOn::Error,
            max_findings: 200,
        },
        _ => Preset {
            profile: "strict".to_string(),
            severity: Severity::Error,
            fail_on: FailOn::Error,
            max_findings: 200,
        },
    }
}
