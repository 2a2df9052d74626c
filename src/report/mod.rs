//! Report presenters.
//!
//! A presenter turns the ordered evaluation sequence into one output
//! format. Presenters only read the results; the CLI picks which one runs.

pub mod html;
pub mod json;
pub mod text;

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::check::{Evaluation, Severity};

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Environment variable set by request-serving gateways (CGI).
pub const GATEWAY_VAR: &str = "GATEWAY_INTERFACE";

/// Output format for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// HTML under a request gateway, text otherwise.
    #[default]
    Auto,
    Text,
    Html,
    Json,
}

impl ReportFormat {
    /// Replace `Auto` with the concrete format for this invocation.
    pub fn resolve(self, under_gateway: bool) -> Self {
        match self {
            Self::Auto if under_gateway => Self::Html,
            Self::Auto => Self::Text,
            other => other,
        }
    }
}

/// Check whether the process was started by a request-serving gateway.
pub fn under_gateway() -> bool {
    std::env::var_os(GATEWAY_VAR).is_some()
}

/// Trait for formatting check results.
pub trait ReportFormatter {
    /// Format evaluations to the given writer.
    fn format<W: Write>(&self, evaluations: &[Evaluation], writer: &mut W)
        -> std::io::Result<()>;
}

/// Result counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub notice: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl Summary {
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let mut summary = Self::default();
        for evaluation in evaluations {
            summary.total += 1;
            match evaluation.status.severity() {
                Severity::Ok => summary.ok += 1,
                Severity::Notice => summary.notice += 1,
                Severity::Info => summary.info += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Error => summary.error += 1,
            }
        }
        summary
    }

    /// Whether the run should fail. Warnings count only when `strict`.
    pub fn fails(&self, strict: bool) -> bool {
        self.error > 0 || (strict && self.warning > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{RuleId, Status};

    fn evaluation(id: &str, status: Status) -> Evaluation {
        Evaluation {
            rule: RuleId::new(id),
            status,
        }
    }

    #[test]
    fn auto_resolves_by_gateway() {
        assert_eq!(ReportFormat::Auto.resolve(true), ReportFormat::Html);
        assert_eq!(ReportFormat::Auto.resolve(false), ReportFormat::Text);
        assert_eq!(ReportFormat::Json.resolve(true), ReportFormat::Json);
        assert_eq!(ReportFormat::Text.resolve(true), ReportFormat::Text);
    }

    #[test]
    fn summary_counts_each_severity() {
        let evaluations = vec![
            evaluation("a", Status::ok("fine")),
            evaluation("b", Status::error("broken")),
            evaluation("c", Status::error("broken too")),
            evaluation("d", Status::warning("low")),
            evaluation("e", Status::info("advice")),
        ];
        let summary = Summary::from_evaluations(&evaluations);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.error, 2);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.notice, 0);
    }

    #[test]
    fn warnings_fail_only_when_strict() {
        let summary = Summary::from_evaluations(&[evaluation("a", Status::warning("low"))]);
        assert!(!summary.fails(false));
        assert!(summary.fails(true));

        let summary = Summary::from_evaluations(&[evaluation("a", Status::notice("odd"))]);
        assert!(!summary.fails(true));
    }
}
