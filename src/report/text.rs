//! Terminal presenter.
//!
//! One line per result: the upper-case severity label, a tab, and the
//! title, colored by severity. A non-empty message follows on its own
//! line, indented by three tabs.

use std::io::Write;

use super::ReportFormatter;
use crate::check::{Evaluation, Severity};
use crate::ui::ProbeTheme;

/// Formats results for terminal display.
pub struct TextFormatter {
    theme: ProbeTheme,
    show_ok: bool,
}

impl TextFormatter {
    pub fn new(theme: ProbeTheme) -> Self {
        Self {
            theme,
            show_ok: true,
        }
    }

    /// Hide passing results.
    pub fn hide_ok(mut self) -> Self {
        self.show_ok = false;
        self
    }
}

impl ReportFormatter for TextFormatter {
    fn format<W: Write>(
        &self,
        evaluations: &[Evaluation],
        writer: &mut W,
    ) -> std::io::Result<()> {
        for evaluation in evaluations {
            let status = &evaluation.status;
            if !self.show_ok && status.severity() == Severity::Ok {
                continue;
            }

            let line = format!("{}\t{}", status.severity().label(), status.title());
            writeln!(
                writer,
                "{}",
                self.theme.severity(status.severity()).apply_to(line)
            )?;

            if status.has_message() {
                writeln!(writer, "\t\t\t{}", status.message())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{RuleId, Status};

    fn render(formatter: &TextFormatter, statuses: Vec<Status>) -> String {
        let evaluations: Vec<Evaluation> = statuses
            .into_iter()
            .enumerate()
            .map(|(i, status)| Evaluation {
                rule: RuleId::new(format!("rule-{}", i)),
                status,
            })
            .collect();
        let mut output = Vec::new();
        formatter.format(&evaluations, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn plain_lines_with_indented_message() {
        let output = render(
            &TextFormatter::new(ProbeTheme::plain()),
            vec![
                Status::ok("Memory limit 64MB or more"),
                Status::warning("Low script execution time")
                    .with_message("max_execution_time is 20."),
            ],
        );
        assert_eq!(
            output,
            "OK\tMemory limit 64MB or more\n\
             WARNING\tLow script execution time\n\
             \t\t\tmax_execution_time is 20.\n"
        );
    }

    #[test]
    fn hide_ok_skips_passing_results() {
        let output = render(
            &TextFormatter::new(ProbeTheme::plain()).hide_ok(),
            vec![Status::ok("fine"), Status::error("broken")],
        );
        assert_eq!(output, "ERROR\tbroken\n");
    }

    #[test]
    fn colored_theme_keeps_text_intact() {
        let output = render(
            &TextFormatter::new(ProbeTheme::new()),
            vec![Status::notice("doc_root is set")],
        );
        assert!(output.contains("NOTICE"));
        assert!(output.contains("doc_root is set"));
    }

    #[test]
    fn empty_sequence_prints_nothing() {
        let output = render(&TextFormatter::new(ProbeTheme::plain()), vec![]);
        assert!(output.is_empty());
    }
}
