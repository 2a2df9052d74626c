//! Current directory in `include_path`.

use crate::check::measure::split_list;
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Warns when `.` is not one of the `include_path` entries.
pub struct IncludePathRule;

impl CheckRule for IncludePathRule {
    fn id(&self) -> RuleId {
        RuleId::new("include-path")
    }

    fn name(&self) -> &str {
        "Include Path"
    }

    fn description(&self) -> &str {
        "Checks that the current directory is part of include_path"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let separator = env.os_family().path_separator();
        let raw = env.config_value("include_path");
        let entries = split_list(&raw, |c| c == separator);

        if entries.contains(&".") {
            Status::ok("Current directory (./) is in include path")
        } else {
            Status::warning("Current directory (./) is not in include path").with_message(format!(
                "include_path = {}. The current directory is normally part of the include \
                 path. The application does not rely on it, but the unusual setting may \
                 break some extensions.",
                entries.join(" ")
            ))
        }
    }
}
