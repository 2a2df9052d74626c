//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::ReportFormat;

/// cmsprobe - Checks a PHP host for the ability to run a CMS.
#[derive(Debug, Parser)]
#[command(name = "cmsprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Requirement profile (layered over ./cmsprobe.yml and the user profile)
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Only show findings that need attention
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Check arguments for a run without a subcommand
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate every check against the host (default if no command specified)
    Check(CheckArgs),

    /// List the checks in evaluation order
    List(ListArgs),

    /// Capture the live host into a snapshot file
    Snapshot(SnapshotArgs),

    /// Print the JSON Schema of a file format
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Auto)]
    pub format: ReportFormat,

    /// Evaluate a captured snapshot instead of the live host
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// PHP binary to query (name on PATH or path)
    #[arg(long, env = "CMSPROBE_PHP")]
    pub php: Option<String>,

    /// Treat the run as request-serving rather than command line
    #[arg(long)]
    pub unattended: bool,

    /// Run only these checks (comma-separated ids or groups)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these checks (comma-separated ids or groups)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Include each check's description
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `snapshot` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SnapshotArgs {
    /// PHP binary to query (name on PATH or path)
    #[arg(long, env = "CMSPROBE_PHP")]
    pub php: Option<String>,

    /// Record the host as request-serving
    #[arg(long)]
    pub unattended: bool,

    /// Write the snapshot to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// File formats with a published schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    /// Requirement profile (cmsprobe.yml)
    Profile,
    /// Host snapshot
    Snapshot,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SchemaArgs {
    /// Which schema to print
    #[arg(value_enum)]
    pub kind: SchemaKind,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["cmsprobe"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn bare_run_parses_check_args() {
        let cli = Cli::parse_from(["cmsprobe", "--format", "html", "--snapshot", "host.yml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.check.format, ReportFormat::Html);
        assert_eq!(cli.check.snapshot, Some(PathBuf::from("host.yml")));
    }

    #[test]
    fn top_level_check_args_conflict_with_subcommand() {
        let result = Cli::try_parse_from(["cmsprobe", "--strict", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn check_args_parse() {
        let cli = Cli::parse_from([
            "cmsprobe",
            "check",
            "--format",
            "json",
            "--snapshot",
            "host.yml",
            "--only",
            "memory-limit,required-extension",
            "--strict",
        ]);
        let Some(Commands::Check(args)) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.snapshot, Some(PathBuf::from("host.yml")));
        assert_eq!(args.only, vec!["memory-limit", "required-extension"]);
        assert!(args.strict);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cmsprobe", "list", "--quiet", "--profile", "p.yml"]);
        assert!(cli.quiet);
        assert_eq!(cli.profile, Some(PathBuf::from("p.yml")));
    }

    #[test]
    fn schema_kind_parses() {
        let cli = Cli::parse_from(["cmsprobe", "schema", "snapshot"]);
        let Some(Commands::Schema(args)) = cli.command else {
            panic!("Expected schema command");
        };
        assert_eq!(args.kind, SchemaKind::Snapshot);
    }
}
