//! Settings that restrict what scripts may do.

use super::predates_5_4;
use crate::check::measure::{is_enabled, split_list};
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Any entry in `disable_functions` is an error.
pub struct DisableFunctionsRule;

impl CheckRule for DisableFunctionsRule {
    fn id(&self) -> RuleId {
        RuleId::new("disable-functions")
    }

    fn name(&self) -> &str {
        "Disabled Functions"
    }

    fn description(&self) -> &str {
        "Checks that no runtime functions are disabled"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let raw = env.config_value("disable_functions");
        let disabled = split_list(&raw, |c| c == ',');
        if disabled.is_empty() {
            return Status::ok("No disabled functions");
        }
        Status::error("Some functions are disabled").with_message(format!(
            "disable_functions={}. The application expects the default set of functions. \
             Such lists usually include exec() and similar, which are used in several \
             places, so parts of the system may break without notice.",
            disabled.join(" ")
        ))
    }
}

/// `safe_mode` must be off on runtimes that still have it.
pub struct SafeModeRule;

impl CheckRule for SafeModeRule {
    fn id(&self) -> RuleId {
        RuleId::new("safe-mode")
    }

    fn name(&self) -> &str {
        "Safe Mode"
    }

    fn description(&self) -> &str {
        "Checks that safe_mode is off on runtimes older than 5.4"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if predates_5_4(env) && is_enabled(&env.config_value("safe_mode")) {
            Status::error("Safe mode on")
                .with_message("safe_mode is enabled. This is unsupported and must be turned off.")
        } else {
            Status::ok("Safe mode off")
        }
    }
}

/// A non-empty `doc_root` is worth a notice.
pub struct DocRootRule;

impl CheckRule for DocRootRule {
    fn id(&self) -> RuleId {
        RuleId::new("doc-root")
    }

    fn name(&self) -> &str {
        "Document Root Restriction"
    }

    fn description(&self) -> &str {
        "Reports a configured doc_root"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let raw = env.config_value("doc_root");
        let doc_root = raw.trim();
        if doc_root.is_empty() {
            return Status::ok("doc_root is not set");
        }
        Status::notice("doc_root is set").with_message(format!(
            "doc_root={}. Scripts outside this directory cannot be executed. It must match \
             the real document root, which fails if the core code is linked in from \
             elsewhere.",
            doc_root
        ))
    }
}

/// `sql.safe_mode` restricts database users to the process owner.
pub struct SqlSafeModeRule;

impl CheckRule for SqlSafeModeRule {
    fn id(&self) -> RuleId {
        RuleId::new("sql-safe-mode")
    }

    fn name(&self) -> &str {
        "SQL Safe Mode"
    }

    fn description(&self) -> &str {
        "Checks that sql.safe_mode is off on runtimes older than 5.4"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if predates_5_4(env) && is_enabled(&env.config_value("sql.safe_mode")) {
            Status::warning("sql.safe_mode is enabled").with_message(format!(
                "Database connections may only use the user name of the web server process \
                 or file owner. The owner of the current script is: {}",
                env.current_user()
            ))
        } else {
            Status::ok("sql.safe_mode is off")
        }
    }
}

/// A non-empty `open_basedir` is worth a notice.
pub struct OpenBasedirRule;

impl CheckRule for OpenBasedirRule {
    fn id(&self) -> RuleId {
        RuleId::new("open-basedir")
    }

    fn name(&self) -> &str {
        "Open Basedir Restriction"
    }

    fn description(&self) -> &str {
        "Reports a configured open_basedir"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let raw = env.config_value("open_basedir");
        if raw.trim().is_empty() {
            return Status::ok("open_basedir is off");
        }
        Status::notice("open_basedir is set").with_message(format!(
            "open_basedir = {}. Files can only be opened and included below these paths. \
             Make sure the core code is not linked in from a directory outside them.",
            raw
        ))
    }
}
