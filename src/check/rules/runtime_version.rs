use crate::check::{CheckRule, RuleId, RuntimeVersion, Status};
use crate::environment::Environment;

/// Compares the runtime version with the supported range.
pub struct RuntimeVersionRule {
    minimum: RuntimeVersion,
    recommended: RuntimeVersion,
}

impl RuntimeVersionRule {
    pub fn new(minimum: &str, recommended: &str) -> Self {
        Self {
            minimum: RuntimeVersion::parse(minimum),
            recommended: RuntimeVersion::parse(recommended),
        }
    }
}

impl CheckRule for RuntimeVersionRule {
    fn id(&self) -> RuleId {
        RuleId::new("runtime-version")
    }

    fn name(&self) -> &str {
        "Runtime Version"
    }

    fn description(&self) -> &str {
        "Checks the PHP version against the minimum and recommended versions"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let current = env.runtime_version();
        let version = RuntimeVersion::parse(&current);

        if version.is_below(&self.minimum) {
            Status::error("Runtime version too low").with_message(format!(
                "PHP {} is too old to run the application. Update to at least PHP {}.",
                current, self.recommended
            ))
        } else if version.is_below(&self.recommended) {
            Status::warning("Runtime version below recommended version").with_message(format!(
                "PHP {} is below the recommended version {}. The application will mostly \
                 run, but expect problems and plan an upgrade.",
                current, self.recommended
            ))
        } else {
            Status::ok("Runtime version is fine")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    fn check(version: &str) -> Status {
        let host = Snapshot {
            runtime_version: version.to_string(),
            ..Default::default()
        };
        RuntimeVersionRule::new("5.3.0", "5.3.7").evaluate(&host)
    }

    #[test]
    fn below_minimum_is_error() {
        let status = check("5.2.9");
        assert_eq!(status.severity(), Severity::Error);
        assert!(status.message().contains("5.2.9"));
    }

    #[test]
    fn between_minimum_and_recommended_is_warning() {
        assert_eq!(check("5.3.4").severity(), Severity::Warning);
        assert_eq!(check("5.3.0").severity(), Severity::Warning);
    }

    #[test]
    fn recommended_and_later_is_ok() {
        assert_eq!(check("5.3.7").severity(), Severity::Ok);
        assert_eq!(check("5.3.10-1ubuntu3").severity(), Severity::Ok);
        assert_eq!(check("8.2.7").severity(), Severity::Ok);
    }

    #[test]
    fn unknown_version_fails_minimum() {
        assert_eq!(check("").severity(), Severity::Error);
        assert_eq!(check("unknown").severity(), Severity::Error);
    }
}
