//! Evaluation of a catalog against one environment.

use serde::Serialize;

use super::catalog::CheckCatalog;
use super::rule::RuleId;
use super::status::Status;
use crate::environment::Environment;

/// A status paired with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub rule: RuleId,
    #[serde(flatten)]
    pub status: Status,
}

/// Runs every rule of a catalog, in registration order.
pub struct CheckRunner<'a> {
    catalog: &'a CheckCatalog,
}

impl<'a> CheckRunner<'a> {
    pub fn new(catalog: &'a CheckCatalog) -> Self {
        Self { catalog }
    }

    /// One status per rule, in catalog order.
    pub fn run(&self, env: &dyn Environment) -> Vec<Status> {
        self.evaluate(env)
            .into_iter()
            .map(|evaluation| evaluation.status)
            .collect()
    }

    /// Like [`run`](Self::run), keeping the rule ids.
    pub fn evaluate(&self, env: &dyn Environment) -> Vec<Evaluation> {
        self.catalog
            .iter()
            .map(|rule| {
                let status = rule.evaluate(env);
                tracing::debug!(
                    "{}: {} ({})",
                    rule.id(),
                    status.severity(),
                    status.title()
                );
                Evaluation {
                    rule: rule.id(),
                    status,
                }
            })
            .collect()
    }
}
