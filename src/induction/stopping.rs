//! Stopping condition for growing a rule's LHS.

use super::evaluators::ConditionAdditionEvaluator;
use crate::error::{DomlemError, Result};
use crate::rules::RuleConditions;
use std::sync::Arc;

/// Decides when rule conditions are good enough to stop adding conditions.
pub trait StoppingChecker: Send + Sync {
    fn is_satisfied(&self, rule_conditions: &RuleConditions) -> bool;
}

/// Satisfied when every configured evaluator meets its threshold on the
/// current rule conditions.
pub struct EvaluationsStoppingChecker {
    evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>,
    thresholds: Vec<f64>,
}

impl EvaluationsStoppingChecker {
    pub fn new(
        evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>,
        thresholds: Vec<f64>,
    ) -> Result<Self> {
        if evaluators.is_empty() {
            return Err(DomlemError::NoConditionEvaluators);
        }
        if evaluators.len() != thresholds.len() {
            return Err(DomlemError::MeasureThresholdCountMismatch {
                measures: evaluators.len(),
                thresholds: thresholds.len(),
            });
        }
        Ok(Self {
            evaluators,
            thresholds,
        })
    }

    /// Single-evaluator checker, the common case.
    pub fn single(evaluator: Arc<dyn ConditionAdditionEvaluator>, threshold: f64) -> Self {
        Self {
            evaluators: vec![evaluator],
            thresholds: vec![threshold],
        }
    }
}

impl StoppingChecker for EvaluationsStoppingChecker {
    fn is_satisfied(&self, rule_conditions: &RuleConditions) -> bool {
        self.evaluators
            .iter()
            .zip(self.thresholds.iter())
            .all(|(evaluator, &threshold)| {
                evaluator
                    .sense()
                    .satisfies(evaluator.evaluate(rule_conditions), threshold)
            })
    }
}

/// Satisfied when the rule covers only objects it is allowed to cover.
///
/// The stopping contract of possible and approximate rules: every covered
/// object must belong to the rule conditions' allowed set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedCoverageStoppingChecker;

impl StoppingChecker for AllowedCoverageStoppingChecker {
    fn is_satisfied(&self, rule_conditions: &RuleConditions) -> bool {
        rule_conditions
            .covered_objects()
            .iter()
            .all(|object| rule_conditions.allowed_objects().contains(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::induction::evaluators::EpsilonRuleEvaluator;
    use crate::rules::{AttributeContext, Condition, ConditionForm, Relation, RuleSemantics, RuleType};
    use crate::table::{Attribute, EvaluationKind, Field, InformationTable, ValueType};
    use crate::value::{MissingKind, Preference, Value};
    use std::collections::BTreeSet;

    fn rule_conditions() -> RuleConditions {
        let attributes = vec![
            Attribute::evaluation(
                "q",
                true,
                EvaluationKind::Condition,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
            Attribute::evaluation(
                "class",
                true,
                EvaluationKind::Decision,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
        ];
        let rows = (0..4)
            .map(|i| {
                vec![
                    Field::Evaluation(Value::Int(i)),
                    Field::Evaluation(Value::Int(if i >= 2 { 2 } else { 1 })),
                ]
            })
            .collect();
        let table = std::sync::Arc::new(InformationTable::new(attributes, rows).unwrap());
        let positive: BTreeSet<usize> = [2, 3].into_iter().collect();
        let all: BTreeSet<usize> = (0..4).collect();
        RuleConditions::new(
            table,
            positive.clone(),
            positive,
            all,
            BTreeSet::new(),
            RuleType::Certain,
            RuleSemantics::AtLeast,
        )
    }

    #[test]
    fn test_satisfied_once_threshold_met() {
        let checker =
            EvaluationsStoppingChecker::single(Arc::new(EpsilonRuleEvaluator), 0.0);
        let mut rc = rule_conditions();
        assert!(!checker.is_satisfied(&rc));

        rc.add_condition(Condition::new(
            AttributeContext {
                attribute_index: 0,
                local_index: Some(0),
                name: "q".into(),
                preference: Preference::Gain,
                missing_kind: MissingKind::Mv2,
            },
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(2),
        ));
        assert!(checker.is_satisfied(&rc));
    }

    #[test]
    fn test_relaxed_threshold_is_satisfied_earlier() {
        let checker =
            EvaluationsStoppingChecker::single(Arc::new(EpsilonRuleEvaluator), 1.0);
        let rc = rule_conditions();
        // Even the empty LHS meets a threshold of 1.0.
        assert!(checker.is_satisfied(&rc));
    }

    #[test]
    fn test_allowed_coverage_checker() {
        let mut rc = rule_conditions();
        // The helper's allowed set is every object, so shrink it by
        // rebuilding with only the positives allowed.
        let table = rc.learning_table().clone();
        let positive: BTreeSet<usize> = [2, 3].into_iter().collect();
        rc = RuleConditions::new(
            table,
            positive.clone(),
            positive.clone(),
            positive,
            BTreeSet::new(),
            RuleType::Certain,
            RuleSemantics::AtLeast,
        );

        let checker = AllowedCoverageStoppingChecker;
        assert!(!checker.is_satisfied(&rc));

        rc.add_condition(Condition::new(
            AttributeContext {
                attribute_index: 0,
                local_index: Some(0),
                name: "q".into(),
                preference: Preference::Gain,
                missing_kind: MissingKind::Mv2,
            },
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(2),
        ));
        assert!(checker.is_satisfied(&rc));
    }

    #[test]
    fn test_constructor_validation() {
        assert!(matches!(
            EvaluationsStoppingChecker::new(vec![], vec![]),
            Err(DomlemError::NoConditionEvaluators)
        ));
        assert!(matches!(
            EvaluationsStoppingChecker::new(vec![Arc::new(EpsilonRuleEvaluator)], vec![0.0, 0.1]),
            Err(DomlemError::MeasureThresholdCountMismatch { .. })
        ));
    }
}
