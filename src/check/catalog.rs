//! The ordered set of rules a run evaluates.
//!
//! Unlike a lookup table, the catalog keeps registration order: reports
//! list results in the order the rules were registered.

use super::rule::{CheckRule, RuleId};
use super::rules;
use crate::config::Profile;

/// Ordered collection of check rules.
pub struct CheckCatalog {
    rules: Vec<Box<dyn CheckRule>>,
}

impl CheckCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a catalog with every built-in rule, parameterized by `profile`.
    pub fn with_builtins(profile: &Profile) -> Self {
        let mut catalog = Self::new();
        for rule in rules::builtin(profile) {
            catalog.register(rule);
        }
        catalog
    }

    /// Append a rule. A rule whose id is already present replaces the
    /// earlier one in place.
    pub fn register(&mut self, rule: Box<dyn CheckRule>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn CheckRule> {
        self.rules
            .iter()
            .find(|r| &r.id() == id)
            .map(|r| r.as_ref())
    }

    /// Iterate over all rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CheckRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keep only the rules matched by `only` (all when empty), then drop
    /// those matched by `skip`. Selectors are rule ids or group names.
    pub fn select(&mut self, only: &[String], skip: &[String]) {
        self.rules.retain(|rule| {
            let id = rule.id();
            let wanted = only.is_empty() || only.iter().any(|s| id.matches(s));
            wanted && !skip.iter().any(|s| id.matches(s))
        });
    }
}

impl Default for CheckCatalog {
    fn default() -> Self {
        Self::new()
    }
}
