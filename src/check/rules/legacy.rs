//! Deprecated runtime features that must be off.

use crate::check::measure::is_enabled;
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

pub struct MagicQuotesRule;

impl CheckRule for MagicQuotesRule {
    fn id(&self) -> RuleId {
        RuleId::new("magic-quotes")
    }

    fn name(&self) -> &str {
        "Magic Quotes"
    }

    fn description(&self) -> &str {
        "Checks that magic_quotes_gpc is off"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if is_enabled(&env.config_value("magic_quotes_gpc")) {
            Status::warning("Magic quotes on").with_message(
                "magic_quotes_gpc is on. The setting is deprecated since PHP 5.3; set it to \
                 \"Off\" until it is removed.",
            )
        } else {
            Status::ok("Magic quotes off")
        }
    }
}

pub struct RegisterGlobalsRule;

impl CheckRule for RegisterGlobalsRule {
    fn id(&self) -> RuleId {
        RuleId::new("register-globals")
    }

    fn name(&self) -> &str {
        "Register Globals"
    }

    fn description(&self) -> &str {
        "Checks that register_globals is off"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if is_enabled(&env.config_value("register_globals")) {
            Status::error("Register globals on").with_message(
                "register_globals must be off. This old setting is a serious security \
                 problem and should never be enabled.",
            )
        } else {
            Status::ok("Register globals off")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    #[test]
    fn magic_quotes() {
        let on = Snapshot::default().with_setting("magic_quotes_gpc", "1");
        assert_eq!(MagicQuotesRule.evaluate(&on).severity(), Severity::Warning);
        assert_eq!(
            MagicQuotesRule.evaluate(&Snapshot::default()).severity(),
            Severity::Ok
        );
    }

    #[test]
    fn register_globals() {
        let on = Snapshot::default().with_setting("register_globals", "On");
        assert_eq!(RegisterGlobalsRule.evaluate(&on).severity(), Severity::Error);

        let garbage = Snapshot::default().with_setting("register_globals", "perhaps");
        assert_eq!(RegisterGlobalsRule.evaluate(&garbage).severity(), Severity::Ok);
    }
}
