//! Snapshot command implementation.
//!
//! The `cmsprobe snapshot` command freezes the live host, probe results
//! included, into a YAML file that `check --snapshot` can evaluate on
//! another machine.

use std::fs;

use crate::cli::args::SnapshotArgs;
use crate::environment::PhpEnvironment;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The snapshot command implementation.
pub struct SnapshotCommand {
    args: SnapshotArgs,
}

impl SnapshotCommand {
    /// Create a new snapshot command.
    pub fn new(args: SnapshotArgs) -> Self {
        Self { args }
    }
}

impl Command for SnapshotCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = PhpEnvironment::discover(self.args.php.as_deref(), self.args.unattended)?;
        let snapshot = env.capture();
        let yaml = snapshot.to_yaml()?;

        match &self.args.output {
            Some(path) => {
                fs::write(path, yaml)?;
                ui.success(&format!(
                    "Snapshot of {} written to {}",
                    env.binary().display(),
                    path.display()
                ));
            }
            None => ui.message(yaml.trim_end()),
        }

        Ok(CommandResult::success())
    }
}
