use crate::check::measure::{format_size, parse_size_bytes};
use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Compares `memory_limit` with the profile's minimum and recommendation.
///
/// A limit of zero or below means the runtime does not limit memory at all,
/// which is reported as a warning rather than a pass.
pub struct MemoryLimitRule {
    minimum: i64,
    recommended: i64,
}

impl MemoryLimitRule {
    pub fn new(minimum: i64, recommended: i64) -> Self {
        Self {
            minimum,
            recommended,
        }
    }
}

impl CheckRule for MemoryLimitRule {
    fn id(&self) -> RuleId {
        RuleId::new("memory-limit")
    }

    fn name(&self) -> &str {
        "Memory Limit"
    }

    fn description(&self) -> &str {
        "Checks memory_limit against the minimum and recommended values"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        let raw = env.config_value("memory_limit");
        let bytes = parse_size_bytes(&raw);
        let minimum = format_size(self.minimum);
        let recommended = format_size(self.recommended);

        if bytes <= 0 {
            Status::warning("Unlimited memory limit").with_message(format!(
                "memory_limit={}. Script memory usage is not limited at all, which is a \
                 risk on production hosts. Set a limit of {} or more.",
                raw, recommended
            ))
        } else if bytes < self.minimum {
            Status::error(format!("Memory limit below {}", minimum)).with_message(format!(
                "memory_limit={}. Scripts are limited to less than {}. Raise the limit to \
                 at least {}, better {}.",
                raw, minimum, minimum, recommended
            ))
        } else if bytes < self.recommended {
            Status::warning(format!("Memory limit below {}", recommended)).with_message(
                format!(
                    "memory_limit={}. A slim installation will probably work, but watch for \
                     memory exhausted errors, especially in the backend. Raise the limit to \
                     {} or more.",
                    raw, recommended
                ),
            )
        } else {
            Status::ok(format!("Memory limit {} or more", recommended))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    const MB: i64 = 1024 * 1024;

    fn check(value: &str) -> Status {
        let host = Snapshot::default().with_setting("memory_limit", value);
        MemoryLimitRule::new(32 * MB, 64 * MB).evaluate(&host)
    }

    #[test]
    fn exactly_minimum_is_warning() {
        let status = check("32M");
        assert_eq!(status.severity(), Severity::Warning);
        assert_eq!(status.title(), "Memory limit below 64MB");
    }

    #[test]
    fn one_byte_under_minimum_is_error() {
        let status = check(&(32 * MB - 1).to_string());
        assert_eq!(status.severity(), Severity::Error);
        assert_eq!(status.title(), "Memory limit below 32MB");
    }

    #[test]
    fn exactly_recommended_is_ok() {
        let status = check("64M");
        assert_eq!(status.severity(), Severity::Ok);
        assert!(!status.has_message());
    }

    #[test]
    fn unlimited_is_warning() {
        assert_eq!(check("-1").severity(), Severity::Warning);
        assert_eq!(check("-1").title(), "Unlimited memory limit");
        assert_eq!(check("").severity(), Severity::Warning);
    }

    #[test]
    fn gigabytes_are_ok() {
        assert_eq!(check("1G").severity(), Severity::Ok);
    }

    #[test]
    fn small_limit_names_value() {
        let status = check("16M");
        assert_eq!(status.severity(), Severity::Error);
        assert!(status.message().contains("memory_limit=16M"));
    }
}
