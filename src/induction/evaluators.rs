//! Monotonic condition-addition evaluators.

use crate::error::{DomlemError, Result};
use crate::measures::MeasureSense;
use crate::rules::{Condition, RuleConditions};
use std::sync::Arc;

/// How an evaluator's quality responds to growing coverage.
///
/// The M4 condition generator exploits this: when the first evaluator
/// improves with coverage, the least restrictive limiting value is the best
/// starting point; when it deteriorates, the most restrictive one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monotonicity {
    ImprovesWithCoverage,
    DeterioratesWithCoverage,
}

/// Grades rule conditions, as they stand and under a hypothetical
/// condition addition, with a declared sense and monotonicity type.
pub trait ConditionAdditionEvaluator: Send + Sync {
    fn sense(&self) -> MeasureSense;

    fn monotonicity(&self) -> Monotonicity;

    /// Evaluation of the rule conditions in their current state.
    fn evaluate(&self, rule_conditions: &RuleConditions) -> f64;

    /// Evaluation of the rule conditions extended by the candidate
    /// condition; must not mutate the rule conditions.
    fn evaluate_with_condition(
        &self,
        rule_conditions: &RuleConditions,
        condition: &Condition,
    ) -> f64;
}

/// Validates an evaluator list for the M4 generator: it must be non-empty
/// and may switch monotonicity type at most once. Returns whether the list
/// mixes monotonicity types.
pub fn validate_evaluators(
    evaluators: &[Arc<dyn ConditionAdditionEvaluator>],
) -> Result<bool> {
    if evaluators.is_empty() {
        return Err(DomlemError::NoConditionEvaluators);
    }
    let mut switches = 0;
    for pair in evaluators.windows(2) {
        if pair[0].monotonicity() != pair[1].monotonicity() {
            switches += 1;
        }
    }
    if switches > 1 {
        return Err(DomlemError::MonotonicitySwitchedTwice);
    }
    Ok(switches == 1)
}

/// Rule-level epsilon: covered objects of the union's complement over the
/// complement's size. Cost sense; deteriorates as coverage grows.
///
/// Mirrors the object-level epsilon consistency measure, so a rule built
/// around a variable-consistency lower approximation member can always
/// reach the same threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonRuleEvaluator;

impl EpsilonRuleEvaluator {
    fn epsilon<'a>(
        rule_conditions: &RuleConditions,
        covered: impl Iterator<Item = &'a usize>,
    ) -> f64 {
        let n = rule_conditions.learning_table().n_objects();
        let negatives_total = n
            - rule_conditions.positive_objects().len()
            - rule_conditions.neutral_objects().len();
        if negatives_total == 0 {
            return 0.0;
        }
        let covered_negatives = covered
            .filter(|object| {
                !rule_conditions.object_is_positive(**object)
                    && !rule_conditions.neutral_objects().contains(*object)
            })
            .count();
        covered_negatives as f64 / negatives_total as f64
    }
}

impl ConditionAdditionEvaluator for EpsilonRuleEvaluator {
    fn sense(&self) -> MeasureSense {
        MeasureSense::Cost
    }

    fn monotonicity(&self) -> Monotonicity {
        Monotonicity::DeterioratesWithCoverage
    }

    fn evaluate(&self, rule_conditions: &RuleConditions) -> f64 {
        Self::epsilon(rule_conditions, rule_conditions.covered_objects().iter())
    }

    fn evaluate_with_condition(
        &self,
        rule_conditions: &RuleConditions,
        condition: &Condition,
    ) -> f64 {
        let covered = rule_conditions.covered_with(condition);
        Self::epsilon(rule_conditions, covered.iter())
    }
}

/// Number of covered positive objects. Gain sense; improves as coverage
/// grows. The canonical tie-breaker after a consistency evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageRuleEvaluator;

impl ConditionAdditionEvaluator for CoverageRuleEvaluator {
    fn sense(&self) -> MeasureSense {
        MeasureSense::Gain
    }

    fn monotonicity(&self) -> Monotonicity {
        Monotonicity::ImprovesWithCoverage
    }

    fn evaluate(&self, rule_conditions: &RuleConditions) -> f64 {
        rule_conditions.n_covered_positive() as f64
    }

    fn evaluate_with_condition(
        &self,
        rule_conditions: &RuleConditions,
        condition: &Condition,
    ) -> f64 {
        rule_conditions
            .covered_with(condition)
            .iter()
            .filter(|object| rule_conditions.object_is_positive(**object))
            .count() as f64
    }
}
