//! Pruning of rule conditions and of whole rule lists.

use super::stopping::StoppingChecker;
use crate::rules::RuleConditions;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Removes redundant conditions from a freshly built rule LHS.
pub trait ConditionPruner: Send + Sync {
    fn prune(&self, rule_conditions: &mut RuleConditions);
}

/// Tries to drop conditions in addition order, earliest first.
///
/// A condition is dropped when the stopping checker remains satisfied
/// without it; otherwise it is re-inserted at its original position so the
/// addition order survives pruning.
pub struct FifoConditionPruner {
    checker: Arc<dyn StoppingChecker>,
}

impl FifoConditionPruner {
    pub fn new(checker: Arc<dyn StoppingChecker>) -> Self {
        Self { checker }
    }
}

impl ConditionPruner for FifoConditionPruner {
    fn prune(&self, rule_conditions: &mut RuleConditions) {
        let mut index = 0;
        while index < rule_conditions.len() {
            let condition = rule_conditions.remove_condition(index);
            if self.checker.is_satisfied(rule_conditions) {
                // Dropped for good; the next condition now sits at `index`.
            } else {
                rule_conditions.insert_condition(index, condition);
                index += 1;
            }
        }
    }
}

/// Removes redundant rules from a per-union rule list.
pub trait RuleSetPruner: Send + Sync {
    /// Prunes the list so that every object of `base` stays covered by at
    /// least one remaining rule.
    fn prune(
        &self,
        rules: Vec<RuleConditions>,
        base: &BTreeSet<usize>,
    ) -> Vec<RuleConditions>;
}

/// Drops rules in emission order whenever the remaining rules still cover
/// every base object.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageRuleSetPruner;

impl RuleSetPruner for CoverageRuleSetPruner {
    fn prune(
        &self,
        rules: Vec<RuleConditions>,
        base: &BTreeSet<usize>,
    ) -> Vec<RuleConditions> {
        // How many rules cover each base object.
        let mut cover_counts: std::collections::HashMap<usize, usize> =
            base.iter().map(|&object| (object, 0)).collect();
        for rule in &rules {
            for object in rule.covered_objects() {
                if let Some(count) = cover_counts.get_mut(object) {
                    *count += 1;
                }
            }
        }

        let mut kept = Vec::with_capacity(rules.len());
        for rule in rules {
            let removable = rule
                .covered_objects()
                .iter()
                .all(|object| cover_counts.get(object).map_or(true, |&count| count >= 2));
            if removable {
                for object in rule.covered_objects() {
                    if let Some(count) = cover_counts.get_mut(object) {
                        *count -= 1;
                    }
                }
            } else {
                kept.push(rule);
            }
        }
        kept
    }
}
