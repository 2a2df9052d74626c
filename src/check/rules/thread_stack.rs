use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Apache on Windows ships with a small thread stack that complex regular
/// expressions can overflow. The configured size is not visible from the
/// runtime, so the rule can only warn.
pub struct ThreadStackSizeRule;

impl CheckRule for ThreadStackSizeRule {
    fn id(&self) -> RuleId {
        RuleId::new("thread-stack-size")
    }

    fn name(&self) -> &str {
        "Thread Stack Size"
    }

    fn description(&self) -> &str {
        "Warns about the Apache thread stack size on Windows"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if env.os_family().is_windows() && env.server_software().starts_with("Apache") {
            Status::warning("Windows Apache thread stack size").with_message(
                "This value cannot be checked, so ignore the warning if it is already taken \
                 care of. Template parsing uses complex regular expressions that need a lot \
                 of stack space. Apache on Windows defaults to a much smaller stack than on \
                 unix. Add \"ThreadStackSize 8388608\" to httpd.conf and restart Apache.",
            )
        } else {
            Status::ok("Thread stack size is not an issue on this host")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    fn host(os: &str, server: &str) -> Snapshot {
        Snapshot {
            os: os.to_string(),
            server_software: server.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn apache_on_windows_warns() {
        let status = ThreadStackSizeRule.evaluate(&host("WINNT", "Apache/2.4.57 (Win64)"));
        assert_eq!(status.severity(), Severity::Warning);
    }

    #[test]
    fn other_combinations_are_ok() {
        for (os, server) in [
            ("WINNT", "Microsoft-IIS/10.0"),
            ("Linux", "Apache/2.4.57 (Debian)"),
            ("Darwin", "Apache/2.4.57"),
            ("WINNT", ""),
        ] {
            assert_eq!(
                ThreadStackSizeRule.evaluate(&host(os, server)).severity(),
                Severity::Ok,
                "{} / {}",
                os,
                server
            );
        }
    }
}
