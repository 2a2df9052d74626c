//! Check command implementation.
//!
//! The `cmsprobe check` command evaluates the check catalog against the
//! live host or a snapshot and prints a report.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::check::{CheckCatalog, CheckRunner, Evaluation};
use crate::cli::args::CheckArgs;
use crate::environment::{Environment, PhpEnvironment, Snapshot};
use crate::error::Result;
use crate::report::{
    under_gateway, HtmlFormatter, JsonFormatter, ReportFormat, ReportFormatter, Summary,
    TextFormatter,
};
use crate::ui::{should_use_colors, OutputMode, ProbeTheme, UserInterface};

use super::dispatcher::{Command, CommandResult, ProfileSource};

/// The check command implementation.
pub struct CheckCommand {
    profile: ProfileSource,
    args: CheckArgs,
    no_color: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(profile: ProfileSource, args: CheckArgs, no_color: bool) -> Self {
        Self {
            profile,
            args,
            no_color,
        }
    }

    fn environment(&self) -> Result<Box<dyn Environment>> {
        match &self.args.snapshot {
            Some(path) => {
                tracing::debug!("Evaluating snapshot {}", path.display());
                Ok(Box::new(Snapshot::load(path)?))
            }
            None => Ok(Box::new(PhpEnvironment::discover(
                self.args.php.as_deref(),
                self.args.unattended,
            )?)),
        }
    }

    fn text_theme(&self) -> ProbeTheme {
        if self.no_color || self.args.output.is_some() || !should_use_colors() {
            ProbeTheme::plain()
        } else {
            ProbeTheme::new()
        }
    }

    fn write_report<W: Write>(
        &self,
        format: ReportFormat,
        application: &str,
        mode: OutputMode,
        evaluations: &[Evaluation],
        writer: &mut W,
    ) -> io::Result<()> {
        match format {
            ReportFormat::Json => JsonFormatter::new().format(evaluations, writer),
            ReportFormat::Html => {
                let mut formatter = HtmlFormatter::page(application);
                if self.args.format == ReportFormat::Auto {
                    formatter = formatter.with_cgi_header();
                }
                formatter.format(evaluations, writer)
            }
            ReportFormat::Text | ReportFormat::Auto => {
                let mut formatter = TextFormatter::new(self.text_theme());
                if !mode.shows_passing() {
                    formatter = formatter.hide_ok();
                }
                formatter.format(evaluations, writer)
            }
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let profile = self.profile.load()?;

        let mut catalog = CheckCatalog::with_builtins(&profile);
        catalog.select(&self.args.only, &self.args.skip);
        if catalog.is_empty() {
            ui.warning("No checks match the --only/--skip selection");
        }

        let env = self.environment()?;
        let evaluations = CheckRunner::new(&catalog).evaluate(env.as_ref());
        let summary = Summary::from_evaluations(&evaluations);

        let format = self.args.format.resolve(under_gateway());
        let to_terminal = format == ReportFormat::Text && self.args.output.is_none();
        if to_terminal {
            ui.show_header(&format!("{} host check", profile.application));
        }

        match &self.args.output {
            Some(path) => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_report(
                    format,
                    &profile.application,
                    ui.output_mode(),
                    &evaluations,
                    &mut writer,
                )?;
                writer.flush()?;
                ui.success(&format!("Report written to {}", path.display()));
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                self.write_report(
                    format,
                    &profile.application,
                    ui.output_mode(),
                    &evaluations,
                    &mut writer,
                )?;
                writer.flush()?;
            }
        }

        if to_terminal {
            report_summary(ui, &summary);
        }

        if summary.fails(self.args.strict) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

fn report_summary(ui: &mut dyn UserInterface, summary: &Summary) {
    if summary.error == 0 && summary.warning == 0 {
        ui.success(&format!("\n{} checks, no errors or warnings", summary.total));
    } else {
        ui.warning(&format!(
            "\n{} checks, {} error(s), {} warning(s)",
            summary.total, summary.error, summary.warning
        ));
    }
}
