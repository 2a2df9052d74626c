use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// One required extension. The catalog registers one rule per profile entry.
pub struct RequiredExtensionRule {
    id: RuleId,
    extension: String,
}

impl RequiredExtensionRule {
    pub fn new(extension: &str) -> Self {
        Self {
            id: RuleId::new(format!("required-extension:{}", extension)),
            extension: extension.to_string(),
        }
    }
}

impl CheckRule for RequiredExtensionRule {
    fn id(&self) -> RuleId {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.extension
    }

    fn description(&self) -> &str {
        "Checks that a required extension is loaded"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if env.has_extension(&self.extension) {
            Status::ok(format!("Extension {} loaded", self.extension))
        } else {
            Status::error(format!("Extension {} not loaded", self.extension)).with_message(
                format!(
                    "The application uses the {} extension, but it is not loaded. Change \
                     the environment to provide it.",
                    self.extension
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Severity;
    use crate::environment::Snapshot;

    #[test]
    fn id_carries_extension_name() {
        assert_eq!(
            RequiredExtensionRule::new("SPL").id(),
            RuleId::new("required-extension:SPL")
        );
    }

    #[test]
    fn absent_extension_is_error_naming_it() {
        let status = RequiredExtensionRule::new("soap").evaluate(&Snapshot::default());
        assert_eq!(status.severity(), Severity::Error);
        assert!(status.title().contains("soap"));
        assert!(status.message().contains("soap"));
    }

    #[test]
    fn present_extension_is_ok() {
        let host = Snapshot::default().with_extension("spl");
        let status = RequiredExtensionRule::new("SPL").evaluate(&host);
        assert_eq!(status.severity(), Severity::Ok);
        assert!(!status.has_message());
    }
}
