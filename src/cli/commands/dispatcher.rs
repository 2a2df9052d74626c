//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_profile, Profile, ProfilePaths};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where the requirement profile comes from.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    work_dir: PathBuf,
    explicit: Option<PathBuf>,
}

impl ProfileSource {
    pub fn new(work_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Discover, merge and validate the profile layers.
    pub fn load(&self) -> Result<Profile> {
        let paths = ProfilePaths::discover(&self.work_dir, self.explicit.as_deref());
        for layer in paths.layers() {
            tracing::debug!("Profile layer: {}", layer.display());
        }
        load_profile(&paths)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    work_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let profile = ProfileSource::new(&self.work_dir, cli.profile.as_deref());
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(profile, args.clone(), cli.no_color);
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(profile, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Snapshot(args)) => {
                let cmd = super::snapshot::SnapshotCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Schema(args)) => {
                let cmd = super::schema::SchemaCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd =
                    super::check::CheckCommand::new(profile, cli.check.clone(), cli.no_color);
                cmd.execute(ui)
            }
        }
    }
}
