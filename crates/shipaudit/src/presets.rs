//! Starter configurations written by `shipaudit init`.

use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Built-in defaults, spelled out.
    #[default]
    Minimal,
    /// Fails the run on any issue and also writes the full audited dataset.
    Strict,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Minimal => "minimal",
            Preset::Strict => "strict",
        }
    }

    pub fn generate(self) -> String {
        match self {
            Preset::Minimal => MINIMAL.to_string(),
            Preset::Strict => STRICT.to_string(),
        }
    }
}

const MINIMAL: &str = r#"# shipaudit configuration (Minimal preset)
#
# String values may reference environment variables: write $NAME in braces,
# optionally with a :-fallback before the closing brace (see the strict preset).
# Command-line flags take precedence over this file.

[defaults]
input = "data/sample_shipments.csv"
output = "output/audit_report.csv"
# full_output = "output/audited_dataset.csv"

# Weight differences at or below this many kg are not issues.
weight_tolerance_kg = 0.0

# "never": exit 0 even with issues; "issue": exit 2 when any row is flagged.
fail_on = "never"

# View filters.
only_issues = true
include_weight = true
include_sla = true
"#;

const STRICT: &str = r#"# shipaudit configuration (Strict preset)
#
# Intended for CI: any flagged shipment fails the run with exit code 2.

[defaults]
input = "${SHIPAUDIT_INPUT:-data/sample_shipments.csv}"
output = "output/audit_report.csv"
full_output = "output/audited_dataset.csv"
weight_tolerance_kg = 0.0
fail_on = "issue"
only_issues = true
include_weight = true
include_sla = true
"#;
