use crate::check::{CheckRule, RuleId, Status};
use crate::environment::Environment;

/// Any of the known opcode caches satisfies this rule.
pub struct OpcodeCacheRule {
    caches: Vec<String>,
}

impl OpcodeCacheRule {
    pub fn new(caches: Vec<String>) -> Self {
        Self { caches }
    }
}

impl CheckRule for OpcodeCacheRule {
    fn id(&self) -> RuleId {
        RuleId::new("opcode-cache")
    }

    fn name(&self) -> &str {
        "Opcode Cache"
    }

    fn description(&self) -> &str {
        "Checks that an opcode cache extension is loaded"
    }

    fn evaluate(&self, env: &dyn Environment) -> Status {
        match self.caches.iter().find(|cache| env.has_extension(cache)) {
            Some(cache) => Status::ok("An opcode cache is loaded")
                .with_message(format!("{} is loaded.", cache)),
            None => Status::warning("No opcode cache loaded").with_message(format!(
                "Opcode caches keep compiled scripts in memory instead of recompiling them on \
                 every request, which can cut parse time by a factor of three. Known caches: {}.",
                self.caches.join(", ")
            )),
        }
    }
}
