//! Schema command implementation.
//!
//! The `cmsprobe schema` command prints the JSON Schema of the profile or
//! snapshot format, for editor completion and validation.

use schemars::{schema_for, Schema};

use crate::cli::args::{SchemaArgs, SchemaKind};
use crate::config::Profile;
use crate::environment::Snapshot;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }
}

/// Generate the schema for one file format.
pub fn generate(kind: SchemaKind) -> Schema {
    match kind {
        SchemaKind::Profile => schema_for!(Profile),
        SchemaKind::Snapshot => schema_for!(Snapshot),
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = generate(self.args.kind);
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        ui.message(&json);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn profile_schema_names_sections() {
        let value = serde_json::to_value(generate(SchemaKind::Profile)).unwrap();
        let properties = &value["properties"];
        for key in ["application", "runtime", "memory", "required_extensions"] {
            assert!(properties.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn snapshot_schema_names_settings() {
        let value = serde_json::to_value(generate(SchemaKind::Snapshot)).unwrap();
        assert!(value["properties"].get("settings").is_some());
        assert!(value["properties"].get("broken_capabilities").is_some());
    }

    #[test]
    fn execute_prints_json() {
        let cmd = SchemaCommand::new(SchemaArgs {
            kind: SchemaKind::Profile,
        });
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert!(parsed.is_object());
    }
}
