//! M4-optimized search for the best elementary condition.

use super::evaluators::{validate_evaluators, ConditionAdditionEvaluator, Monotonicity};
use crate::error::{DomlemError, Result};
use crate::rules::{AttributeContext, Condition, RuleConditions, RuleSemantics, RuleType};
use crate::value::{Preference, Value};
use std::cmp::Ordering;
use std::sync::Arc;

/// Chooses the next elementary condition to add to a rule's LHS.
pub trait ConditionGenerator: Send + Sync {
    /// The best condition over the considered objects, ranked
    /// lexicographically by the configured evaluators.
    fn best_condition(
        &self,
        considered_objects: &[usize],
        rule_conditions: &RuleConditions,
    ) -> Result<Condition>;
}

/// Condition generator exploiting the monotonic relationship between an
/// ordered attribute's limiting value and every evaluator's quality.
///
/// For each criterion with simple, totally ordered values, the generator
/// first evaluates the extreme limiting value: the least restrictive one
/// when the first evaluator improves with coverage, the most restrictive
/// one otherwise. Values strictly inside the remaining search interval are
/// scanned only when the evaluators disagree in monotonicity type; each
/// comparison outcome tightens one endpoint of the interval, pruning the
/// scan. Attributes with pair values or without preference fall back to an
/// exhaustive scan over the considered objects' distinct values.
pub struct M4ConditionGenerator {
    evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>,
    mixed_monotonicity: bool,
}

impl M4ConditionGenerator {
    /// Stores the evaluator list after validating that it is non-empty and
    /// switches monotonicity type at most once.
    pub fn new(evaluators: Vec<Arc<dyn ConditionAdditionEvaluator>>) -> Result<Self> {
        let mixed_monotonicity = validate_evaluators(&evaluators)?;
        Ok(Self {
            evaluators,
            mixed_monotonicity,
        })
    }

    fn compare(
        &self,
        candidate: &mut Scored,
        best: &mut Scored,
        used_evaluators: usize,
        rule_conditions: &RuleConditions,
    ) -> Comparison {
        if best.condition.is_none() {
            return Comparison::Better;
        }
        for i in 0..used_evaluators {
            let candidate_evaluation = candidate.evaluation(i, &self.evaluators, rule_conditions);
            let best_evaluation = best.evaluation(i, &self.evaluators, rule_conditions);
            let improved = match candidate_evaluation.partial_cmp(&best_evaluation) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Less) => false,
                _ => continue,
            };
            let gain = self.evaluators[i].sense() == crate::measures::MeasureSense::Gain;
            return if improved == gain {
                Comparison::Better
            } else {
                Comparison::Worse
            };
        }
        Comparison::Equal
    }
}

impl ConditionGenerator for M4ConditionGenerator {
    fn best_condition(
        &self,
        considered_objects: &[usize],
        rule_conditions: &RuleConditions,
    ) -> Result<Condition> {
        let table = rule_conditions.learning_table().clone();
        let semantics = rule_conditions.semantics();
        let threshold_phrasing = rule_conditions.rule_type() != RuleType::Possible;
        let first_monotonicity = self.evaluators[0].monotonicity();

        let mut best = Scored::new(self.evaluators.len());
        let mut candidate = Scored::new(self.evaluators.len());

        for local in 0..table.n_condition_attributes() {
            let evaluation_attribute = table
                .condition_attribute(local)
                .as_evaluation()
                .expect("active condition attribute is an evaluation attribute");
            let context = AttributeContext::from_table(&table, local);

            let optimizable = evaluation_attribute.preference != Preference::None
                && evaluation_attribute.value_type.is_simple()
                && semantics != RuleSemantics::Equal;

            if !optimizable {
                // Exhaustive scan over the considered objects' distinct
                // known evaluations.
                let mut seen: Vec<Value> = Vec::new();
                for &object in considered_objects {
                    let evaluation = table.condition_field(object, local);
                    if evaluation.is_missing() || seen.contains(evaluation) {
                        continue;
                    }
                    seen.push(evaluation.clone());
                    let condition = Condition::for_rule(
                        threshold_phrasing,
                        semantics,
                        context.clone(),
                        evaluation.clone(),
                    );
                    if rule_conditions.contains_condition(&condition) {
                        continue;
                    }
                    candidate.set(condition);
                    if self.compare(
                        &mut candidate,
                        &mut best,
                        self.evaluators.len(),
                        rule_conditions,
                    ) == Comparison::Better
                    {
                        best.copy_from(&candidate);
                    }
                }
                continue;
            }

            // Conflates the attribute's preference direction with the
            // rule's semantics, so every comparison below reads as if a
            // ">=" condition were searched for.
            let multiplier = preference_multiplier(evaluation_attribute.preference)
                * semantics_multiplier(semantics);

            // Extreme limiting value among the considered objects.
            let mut extreme: Option<&Value> = None;
            for &object in considered_objects {
                let evaluation = table.condition_field(object, local);
                if !evaluation.is_known_simple() {
                    continue;
                }
                extreme = Some(match extreme {
                    None => evaluation,
                    Some(current) => {
                        let comparison = natural_mult(evaluation, current, multiplier);
                        let replace = match first_monotonicity {
                            // Less restrictive limiting value found.
                            Monotonicity::ImprovesWithCoverage => comparison < 0,
                            // More restrictive limiting value found.
                            Monotonicity::DeterioratesWithCoverage => comparison > 0,
                        };
                        if replace {
                            evaluation
                        } else {
                            current
                        }
                    }
                });
            }
            let Some(extreme) = extreme else {
                // Every considered object misses an evaluation here.
                continue;
            };
            let extreme = extreme.clone();

            let mut interval = SearchInterval {
                sufficient: extreme.clone(),
                insufficient: None,
                generalizing: first_monotonicity == Monotonicity::ImprovesWithCoverage,
            };

            let extreme_condition = Condition::for_rule(
                threshold_phrasing,
                semantics,
                context.clone(),
                extreme,
            );
            let mut check_less_extreme;
            if rule_conditions.contains_condition(&extreme_condition) {
                // The extreme duplicates a stored condition; interior
                // values are the only candidates left on this attribute.
                check_less_extreme = true;
            } else {
                candidate.set(extreme_condition);
                match self.compare(&mut candidate, &mut best, 1, rule_conditions) {
                    Comparison::Better => {
                        best.copy_from(&candidate);
                        check_less_extreme = self.mixed_monotonicity;
                    }
                    Comparison::Equal => {
                        if self.compare(
                            &mut candidate,
                            &mut best,
                            self.evaluators.len(),
                            rule_conditions,
                        ) == Comparison::Better
                        {
                            best.copy_from(&candidate);
                        }
                        check_less_extreme = self.mixed_monotonicity;
                    }
                    Comparison::Worse => {
                        // The best condition cannot be improved on this
                        // attribute.
                        check_less_extreme = false;
                    }
                }
            }

            if check_less_extreme {
                for &object in considered_objects {
                    let evaluation = table.condition_field(object, local);
                    if !evaluation.is_known_simple()
                        || !interval.includes(evaluation, multiplier)
                    {
                        continue;
                    }
                    let condition = Condition::for_rule(
                        threshold_phrasing,
                        semantics,
                        context.clone(),
                        evaluation.clone(),
                    );
                    if rule_conditions.contains_condition(&condition) {
                        continue;
                    }
                    candidate.set(condition);
                    let outcome = self.compare(
                        &mut candidate,
                        &mut best,
                        self.evaluators.len(),
                        rule_conditions,
                    );
                    if outcome == Comparison::Better {
                        best.copy_from(&candidate);
                    }
                    match outcome {
                        Comparison::Better | Comparison::Equal => {
                            interval.sufficient = evaluation.clone();
                        }
                        Comparison::Worse => {
                            interval.insufficient = Some(evaluation.clone());
                        }
                    }
                }
            }
        }

        best.condition.ok_or(DomlemError::ElementaryConditionNotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Better,
    Equal,
    Worse,
}

/// A condition with lazily computed evaluator values.
///
/// Evaluations are filled strictly left to right, so a lexicographic
/// comparison never evaluates more than it has to.
struct Scored {
    condition: Option<Condition>,
    evaluations: Vec<f64>,
    valid: usize,
}

impl Scored {
    fn new(n_evaluators: usize) -> Self {
        Self {
            condition: None,
            evaluations: vec![0.0; n_evaluators],
            valid: 0,
        }
    }

    fn set(&mut self, condition: Condition) {
        self.condition = Some(condition);
        self.valid = 0;
    }

    fn copy_from(&mut self, other: &Scored) {
        self.condition = other.condition.clone();
        self.evaluations[..other.valid].copy_from_slice(&other.evaluations[..other.valid]);
        self.valid = other.valid;
    }

    fn evaluation(
        &mut self,
        index: usize,
        evaluators: &[Arc<dyn ConditionAdditionEvaluator>],
        rule_conditions: &RuleConditions,
    ) -> f64 {
        while self.valid <= index {
            let condition = self
                .condition
                .as_ref()
                .expect("condition set before evaluation");
            self.evaluations[self.valid] =
                evaluators[self.valid].evaluate_with_condition(rule_conditions, condition);
            self.valid += 1;
        }
        self.evaluations[index]
    }
}

/// Open interval of limiting values still worth examining on one
/// attribute, phrased through the compare-to multiplier as if a ">="
/// condition were searched for.
struct SearchInterval {
    /// Endpoint whose condition is known to be at least as good as the
    /// current best (the extreme value initially).
    sufficient: Value,
    /// Endpoint whose condition is known to be worse; open side while
    /// `None`.
    insufficient: Option<Value>,
    generalizing: bool,
}

impl SearchInterval {
    fn includes(&self, evaluation: &Value, multiplier: i32) -> bool {
        if self.generalizing {
            natural_mult(evaluation, &self.sufficient, multiplier) > 0
                && self
                    .insufficient
                    .as_ref()
                    .map_or(true, |limit| natural_mult(evaluation, limit, multiplier) < 0)
        } else {
            self.insufficient
                .as_ref()
                .map_or(true, |limit| natural_mult(evaluation, limit, multiplier) > 0)
                && natural_mult(evaluation, &self.sufficient, multiplier) < 0
        }
    }
}

fn preference_multiplier(preference: Preference) -> i32 {
    match preference {
        Preference::Gain => 1,
        Preference::Cost | Preference::None => -1,
    }
}

fn semantics_multiplier(semantics: RuleSemantics) -> i32 {
    match semantics {
        RuleSemantics::AtLeast => 1,
        RuleSemantics::AtMost | RuleSemantics::Equal => -1,
    }
}

fn natural_mult(a: &Value, b: &Value, multiplier: i32) -> i32 {
    let ordering = a
        .natural_cmp(b)
        .expect("known simple values of one attribute share a subtype");
    ordering as i32 * multiplier
}
