//! Check rule definitions.
//!
//! - [`CheckRule`] - the trait every rule implements
//! - [`RuleId`] - stable kebab-case identifier of a rule

use serde::Serialize;

use super::status::Status;
use crate::environment::Environment;

/// Unique identifier for a check rule.
///
/// Parameterized rules append their parameter after a colon
/// (`required-extension:json`); the part before it is the rule's group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id up to the first `:`, or the whole id.
    pub fn group(&self) -> &str {
        self.0.split(':').next().unwrap_or(&self.0)
    }

    /// Whether a selector given on the command line names this rule,
    /// either exactly or by group.
    pub fn matches(&self, selector: &str) -> bool {
        self.0 == selector || self.group() == selector
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single verification against the host environment.
///
/// Rules are stateless apart from their parameters. `evaluate` must return
/// exactly one status for any environment and must not panic.
pub trait CheckRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Human-readable name of the rule.
    fn name(&self) -> &str;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Classify the environment.
    fn evaluate(&self, env: &dyn Environment) -> Status;
}
