//! JSON presenter for tooling integration.

use std::io::Write;

use serde::Serialize;

use super::{ReportFormatter, Summary};
use crate::check::Evaluation;

/// Formats results as machine-readable JSON.
#[derive(Debug, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [Evaluation],
    summary: Summary,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        evaluations: &[Evaluation],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            results: evaluations,
            summary: Summary::from_evaluations(evaluations),
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{RuleId, Status};

    #[test]
    fn results_keep_order_and_rule_ids() {
        let evaluations = vec![
            Evaluation {
                rule: RuleId::new("safe-mode"),
                status: Status::ok("safe_mode off"),
            },
            Evaluation {
                rule: RuleId::new("required-extension:soap"),
                status: Status::error("Extension soap not loaded").with_message("Load it."),
            },
        ];

        let mut output = Vec::new();
        JsonFormatter::new().format(&evaluations, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["results"][0]["rule"], "safe-mode");
        assert_eq!(parsed["results"][1]["rule"], "required-extension:soap");
        assert_eq!(parsed["results"][1]["severity"], "error");
        assert_eq!(parsed["results"][1]["message"], "Load it.");
        assert_eq!(parsed["summary"]["total"], 2);
        assert_eq!(parsed["summary"]["error"], 1);
        assert_eq!(parsed["summary"]["ok"], 1);
    }

    #[test]
    fn empty_run_has_zero_summary() {
        let mut output = Vec::new();
        JsonFormatter.format(&[], &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["results"], serde_json::json!([]));
        assert_eq!(parsed["summary"]["total"], 0);
    }
}
