//! List command implementation.
//!
//! The `cmsprobe list` command lists the checks in evaluation order.

use crate::check::CheckCatalog;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProfileSource};

/// The list command implementation.
pub struct ListCommand {
    profile: ProfileSource,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(profile: ProfileSource, args: ListArgs) -> Self {
        Self { profile, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let profile = self.profile.load()?;
        let catalog = CheckCatalog::with_builtins(&profile);

        ui.show_header(&format!("{} checks", profile.application));

        let width = catalog
            .iter()
            .map(|rule| rule.id().as_str().len())
            .max()
            .unwrap_or(0);

        for rule in catalog.iter() {
            let id = rule.id();
            ui.message(&format!(
                "{:<width$}  {}",
                id.as_str(),
                rule.name(),
                width = width
            ));
            if self.args.long {
                ui.message(&format!(
                    "{:<width$}  {}",
                    "",
                    rule.description(),
                    width = width
                ));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_every_check_in_order() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(ProfileSource::new(temp.path(), None), ListArgs::default());

        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.headers(), ["TYPO3 CMS checks".to_string()]);
        assert!(ui.messages()[0].starts_with("include-path"));
        assert!(ui.messages().last().unwrap().starts_with("register-globals"));
    }

    #[test]
    fn profile_extensions_are_listed() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("cmsprobe.yml"),
            "required_extensions: [intl]\n",
        )
        .unwrap();
        let cmd = ListCommand::new(ProfileSource::new(temp.path(), None), ListArgs::default());

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_output("required-extension:intl"));
        assert!(!ui.has_output("required-extension:soap"));
    }

    #[test]
    fn long_listing_adds_descriptions() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(
            ProfileSource::new(temp.path(), None),
            ListArgs { long: true },
        );

        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_output("Checks that register_globals is off"));
    }
}
