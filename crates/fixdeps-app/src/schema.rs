//! JSON Schema export for the report and config formats.

use schemars::schema_for;

/// Schema of the `fixdeps.report.v1` envelope.
pub fn report_schema() -> schemars::Schema {
    schema_for!(fixdeps_types::FixdepsReport)
}

/// Schema of `fixdeps.toml`.
pub fn config_schema() -> schemars::Schema {
    schema_for!(fixdeps_settings::FixdepsConfigV1)
}
