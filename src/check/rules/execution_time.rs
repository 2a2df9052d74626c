use crate::check::measure::parse_number;
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Compares `max_execution_time` with the profile's bounds.
///
/// Zero means unbounded. That is how the command line runs anyway, so it
/// is only flagged on unattended runs.
pub struct MaxExecutionTimeRule {
    minimum: i64,
    recommended: i64,
}

impl MaxExecutionTimeRule {
    pub fn new(minimum: i64, recommended: i64) -> Self {
        Self {
            minimum,
            recommended,
        }
    }
}

impl CheckRule for MaxExecutionTimeRule {
    fn id(&self) -> RuleId {
        RuleId::new("max-execution-time")
    }

    fn name(&self) -> &str {
        "Execution Time Ceiling"
    }

    fn description(&self) -> &str {
        "Checks max_execution_time against the minimum and recommended values"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let seconds = parse_number(&env.config_value("max_execution_time"));

        if seconds == 0 && !env.is_interactive() {
            Status::warning("Unbounded script execution time").with_message(format!(
                "max_execution_time is 0 (unbounded). A script stuck in a loop can run \
                 forever and exhaust the server. Set it to {} instead.",
                self.recommended
            ))
        } else if seconds < self.minimum {
            Status::error("Low script execution time").with_message(format!(
                "max_execution_time is {}. Some expensive operations take longer than \
                 that. Raise it to {}.",
                seconds, self.recommended
            ))
        } else if seconds < self.recommended {
            Status::warning("Low script execution time").with_message(format!(
                "max_execution_time is {}. The application often runs with {}, but long \
                 calculations may be cut off. Consider raising it to {}.",
                seconds, self.minimum, self.recommended
            ))
        } else {
            Status::ok(format!(
                "Maximum script execution time is {} seconds or more",
                self.recommended
            ))
        }
    }
}
