//! Rule minimality checking against the already accepted rules.

use super::evaluators::ConditionAdditionEvaluator;
use crate::measures::MeasureSense;
use crate::rules::{Condition, RuleConditions};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A rule candidate reduced to what minimality checking needs: its LHS,
/// its covered positive objects, and its evaluations under the configured
/// measures.
#[derive(Debug, Clone)]
pub struct RuleCandidate {
    pub conditions: Vec<Condition>,
    pub covered_positive: BTreeSet<usize>,
    pub evaluations: Vec<f64>,
}

/// Checks that a new rule is not dominated by an accepted one.
///
/// A candidate is minimal iff no accepted rule covers a superset of its
/// covered positive objects (or carries a syntactically at-least-as-general
/// LHS) while being non-worse on every configured measure.
pub struct MinimalityChecker {
    evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>,
}

impl MinimalityChecker {
    pub fn new(evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>) -> Self {
        Self { evaluators }
    }

    /// Builds the candidate record for frozen rule conditions.
    pub fn candidate(&self, rule_conditions: &RuleConditions) -> RuleCandidate {
        RuleCandidate {
            conditions: rule_conditions.conditions().to_vec(),
            covered_positive: rule_conditions
                .covered_objects()
                .iter()
                .copied()
                .filter(|object| rule_conditions.object_is_positive(*object))
                .collect(),
            evaluations: self
                .evaluators
                .iter()
                .map(|evaluator| evaluator.evaluate(rule_conditions))
                .collect(),
        }
    }

    pub fn is_minimal(&self, accepted: &[RuleCandidate], candidate: &RuleCandidate) -> bool {
        !accepted.iter().any(|existing| {
            self.dominates_coverage(existing, candidate)
                && self.non_worse_everywhere(existing, candidate)
        })
    }

    /// Tells if `existing` covers at least the candidate's positives; a
    /// syntactically more general LHS implies this without set comparison.
    fn dominates_coverage(&self, existing: &RuleCandidate, candidate: &RuleCandidate) -> bool {
        let lhs_at_least_as_general = existing.conditions.iter().all(|general| {
            candidate
                .conditions
                .iter()
                .any(|specific| specific.implies(general))
        });
        lhs_at_least_as_general
            || candidate
                .covered_positive
                .is_subset(&existing.covered_positive)
    }

    fn non_worse_everywhere(&self, existing: &RuleCandidate, candidate: &RuleCandidate) -> bool {
        self.evaluators
            .iter()
            .zip(existing.evaluations.iter().zip(candidate.evaluations.iter()))
            .all(|(evaluator, (&theirs, &ours))| match evaluator.sense() {
                MeasureSense::Gain => theirs >= ours,
                MeasureSense::Cost => theirs <= ours,
            })
    }
}
