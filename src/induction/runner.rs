//! The VC-DomLEM sequential covering loop and library entry points.

use super::config::{AllowedObjectsKind, VcDomLemConfig};
use super::evaluators::{ConditionAdditionEvaluator, CoverageRuleEvaluator, EpsilonRuleEvaluator};
use super::generator::{ConditionGenerator, M4ConditionGenerator};
use super::minimality::{MinimalityChecker, RuleCandidate};
use super::pruners::{ConditionPruner, CoverageRuleSetPruner, FifoConditionPruner, RuleSetPruner};
use super::stopping::{
    AllowedCoverageStoppingChecker, EvaluationsStoppingChecker, StoppingChecker,
};
use crate::approx::{RoughSetCalculator, Union, UnionFamily, UnionKind, VcDominanceCalculator};
use crate::dominance::DominanceCones;
use crate::error::{DomlemError, Result};
use crate::measures::EpsilonConsistency;
use crate::rules::{
    AttributeContext, Condition, Rule, RuleConditions, RuleSemantics, RuleSet,
    RuleSetWithCharacteristics, RuleType,
};
use crate::table::InformationTable;
use std::collections::BTreeSet;
use std::sync::Arc;

/// VC-DomLEM: sequential covering over the approximations of a union
/// family.
///
/// For every approximated union, rules are grown condition by condition
/// until the stopping checker is satisfied, pruned FIFO, emitted until the
/// base set is covered, pruned as a set, and finally filtered through the
/// global minimality check. Upward unions contribute their rules before
/// downward unions.
pub struct VcDomLem {
    config: VcDomLemConfig,
    generator: M4ConditionGenerator,
    stopping: Arc<dyn StoppingChecker>,
    condition_pruner: FifoConditionPruner,
    set_pruner: CoverageRuleSetPruner,
    minimality: MinimalityChecker,
}

impl VcDomLem {
    /// Wires the default components: an epsilon evaluator followed by a
    /// coverage tie-breaker, an M4 generator, a FIFO condition pruner, and
    /// a coverage-preserving rule-set pruner.
    ///
    /// Certain rules stop growing once the epsilon threshold is met;
    /// possible and approximate rules stop once every covered object is
    /// allowed to be covered.
    pub fn new(config: VcDomLemConfig) -> Result<Self> {
        config.validate()?;

        let epsilon: Arc<dyn ConditionAdditionEvaluator> = Arc::new(EpsilonRuleEvaluator);
        let coverage: Arc<dyn ConditionAdditionEvaluator> = Arc::new(CoverageRuleEvaluator);
        let evaluators = vec![epsilon.clone(), coverage];

        let generator = M4ConditionGenerator::new(evaluators.clone())?;
        let stopping: Arc<dyn StoppingChecker> = match config.rule_type {
            RuleType::Certain => Arc::new(EvaluationsStoppingChecker::single(
                epsilon,
                config.consistency_threshold,
            )),
            RuleType::Possible | RuleType::Approximate => {
                Arc::new(AllowedCoverageStoppingChecker)
            }
        };
        let condition_pruner = FifoConditionPruner::new(stopping.clone());
        let minimality = MinimalityChecker::new(evaluators);

        Ok(Self {
            config,
            generator,
            stopping,
            condition_pruner,
            set_pruner: CoverageRuleSetPruner,
            minimality,
        })
    }

    pub fn config(&self) -> &VcDomLemConfig {
        &self.config
    }

    /// Induces rules for every union of the family, upward unions first.
    pub fn induce(&self, family: &UnionFamily) -> Result<RuleSetWithCharacteristics> {
        let mut accepted: Vec<RuleCandidate> = Vec::new();
        let mut rules = Vec::new();
        let mut characteristics = Vec::new();

        for union in family.iter() {
            let union_rules = self.rules_for_union(union)?;

            // Verify minimality of the whole batch against the rules
            // accepted for previous unions, then accept the batch.
            let mut verified = Vec::new();
            for rule_conditions in union_rules {
                let candidate = self.minimality.candidate(&rule_conditions);
                if self.minimality.is_minimal(&accepted, &candidate) {
                    rules.push(self.to_rule(union, &rule_conditions)?);
                    characteristics.push(rule_conditions.coverage_info());
                    verified.push(candidate);
                }
            }
            accepted.extend(verified);
        }

        Ok(RuleSetWithCharacteristics::new(rules, characteristics))
    }

    /// The sequential covering loop for a single approximated union.
    fn rules_for_union(&self, union: &Union) -> Result<Vec<RuleConditions>> {
        let table = union.information_table().clone();
        let semantics = match union.kind() {
            UnionKind::AtLeast => RuleSemantics::AtLeast,
            UnionKind::AtMost => RuleSemantics::AtMost,
        };

        let base: BTreeSet<usize> = match self.config.rule_type {
            RuleType::Certain => union.lower_approximation().clone(),
            RuleType::Possible => union.upper_approximation().clone(),
            RuleType::Approximate => union.boundary().clone(),
        };

        let mut allowed: BTreeSet<usize> = match self.config.rule_type {
            RuleType::Certain => match self.config.allowed_objects {
                AllowedObjectsKind::PositiveRegion => union.positive_region().clone(),
                AllowedObjectsKind::PositiveAndBoundaryRegions => union
                    .positive_region()
                    .union(union.boundary_region())
                    .copied()
                    .collect(),
                AllowedObjectsKind::AnyRegion => (0..table.n_objects()).collect(),
            },
            RuleType::Possible | RuleType::Approximate => base.clone(),
        };
        allowed.extend(union.neutral_objects().iter().copied());

        let mut uncovered = base.clone();
        let mut emitted = Vec::new();

        while !uncovered.is_empty() {
            let mut rule_conditions = RuleConditions::new(
                table.clone(),
                union.objects().clone(),
                base.clone(),
                allowed.clone(),
                union.neutral_objects().clone(),
                self.config.rule_type,
                semantics,
            );
            let mut considered: Vec<usize> = uncovered.iter().copied().collect();

            while !self.stopping.is_satisfied(&rule_conditions) {
                match self.generator.best_condition(&considered, &rule_conditions) {
                    Ok(condition) => {
                        rule_conditions.add_condition(condition);
                        considered.retain(|&object| rule_conditions.covers(object));
                    }
                    Err(DomlemError::ElementaryConditionNotFound) => break,
                    Err(error) => return Err(error),
                }
            }

            self.condition_pruner.prune(&mut rule_conditions);

            let before = uncovered.len();
            for object in rule_conditions.covered_objects() {
                uncovered.remove(object);
            }
            if uncovered.len() == before {
                // No progress is possible; the data admits no further rule.
                return Err(DomlemError::ElementaryConditionNotFound);
            }
            emitted.push(rule_conditions);
        }

        Ok(self.set_pruner.prune(emitted, &base))
    }

    /// Converts frozen rule conditions into a decision rule for the union.
    fn to_rule(&self, union: &Union, rule_conditions: &RuleConditions) -> Result<Rule> {
        let table = union.information_table();
        let semantics = rule_conditions.semantics();
        let threshold_phrasing = self.config.rule_type != RuleType::Possible;

        let mut decisions = Vec::new();
        for attribute_index in union.limiting_decision().attribute_indices() {
            let context = AttributeContext::from_attribute(table, attribute_index)?;
            let value = union
                .limiting_decision()
                .value_for(attribute_index)
                .expect("decision carries a value for each contributing attribute")
                .clone();
            decisions.push(Condition::for_rule(
                threshold_phrasing,
                semantics,
                context,
                value,
            ));
        }

        Ok(Rule::new(
            self.config.rule_type,
            semantics,
            rule_conditions.conditions().to_vec(),
            decisions,
        ))
    }
}

/// Induces certain decision rules at full consistency (epsilon 0.0).
pub fn induce_rules(table: Arc<InformationTable>) -> Result<RuleSet> {
    induce_rules_with_threshold(table, 0.0)
}

/// Induces certain decision rules under the given epsilon consistency
/// threshold (variable-consistency DRSA).
pub fn induce_rules_with_threshold(
    table: Arc<InformationTable>,
    consistency_threshold: f64,
) -> Result<RuleSet> {
    let config = VcDomLemConfig::default().with_consistency_threshold(consistency_threshold);
    induce_rules_with_characteristics(table, config).map(RuleSetWithCharacteristics::into_rule_set)
}

/// Induces rules together with their per-rule coverage characteristics.
pub fn induce_rules_with_characteristics(
    table: Arc<InformationTable>,
    config: VcDomLemConfig,
) -> Result<RuleSetWithCharacteristics> {
    let cones = Arc::new(DominanceCones::compute(&table));
    let calculator: Arc<dyn RoughSetCalculator> = Arc::new(VcDominanceCalculator::with_measure(
        Arc::new(EpsilonConsistency),
        config.consistency_threshold,
    ));
    let family = UnionFamily::new(table, cones, calculator)?;
    let learner = VcDomLem::new(config)?;
    learner.induce(&family)
}
