use crate::check::{CheckRule, RuleId, Status};
use crate::environment::{Capability, Environment};

/// Documentation comments must survive to runtime reflection.
///
/// Annotation-driven frameworks read behavior from doc comments. Some
/// opcode caches strip them unless built with a special flag.
pub struct DocCommentReflectionRule;

impl CheckRule for DocCommentReflectionRule {
    fn id(&self) -> RuleId {
        RuleId::new("doc-comment-reflection")
    }

    fn name(&self) -> &str {
        "Doc Comment Reflection"
    }

    fn description(&self) -> &str {
        "Checks that doc comments can be read back through reflection"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        if !env.has_extension("Reflection") {
            return Status::error("Doc comment reflection missing").with_message(
                "The Reflection extension is not loaded, so annotations in doc comments \
                 cannot be read.",
            );
        }
        if env.probe(Capability::DocCommentReflection) {
            Status::ok("Doc comment reflection works")
        } else {
            Status::error("Doc comment reflection broken").with_message(
                "Reflection is available, but doc comments come back empty. Extensions \
                 that rely on annotations will break. eaccelerator is known to cause this \
                 unless compiled with --with-eaccelerator-doc-comment-inclusion.",
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
    fn missing_reflection_extension() {
        let status = DocCommentReflectionRule.evaluate(&Snapshot::default());
        assert_eq!(status.severity(), Severity::Error);
        assert!(status.message().contains("Reflection"));
    }

    #[test]
    fn probe_failure_is_broken() {
        let mut host = Snapshot::default().with_extension("Reflection");
        host.broken_capabilities = vec![Capability::DocCommentReflection];
        let status = DocCommentReflectionRule.evaluate(&host);
        assert_eq!(status.severity(), Severity::Error);
        assert_eq!(status.title(), "Doc comment reflection broken");
    }

    #[test]
    fn working_reflection() {
        let host = Snapshot::default().with_extension("reflection");
        assert_eq!(DocCommentReflectionRule.evaluate(&host).severity(), Severity::Ok);
    }
}
