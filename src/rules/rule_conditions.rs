//! The left-hand side of a rule under construction, with incremental
//! coverage bookkeeping.

use super::condition::{Condition, RuleSemantics};
use super::rule::{RuleCoverageInfo, RuleType};
use crate::table::InformationTable;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Ordered list of elementary conditions plus the bookkeeping the
/// sequential coverer needs.
///
/// For every object the structure maintains the number of stored conditions
/// the object does *not* satisfy; the covered set is exactly the set of
/// objects whose counter is zero. Adding a condition applies the delta in
/// O(N), removing one reverses it exactly, so coverage never has to be
/// recomputed from scratch.
pub struct RuleConditions {
    table: Arc<InformationTable>,
    rule_type: RuleType,
    semantics: RuleSemantics,
    /// Objects the rule should be appreciated for covering.
    positive: BTreeSet<usize>,
    /// Approximation objects driving condition generation.
    base: BTreeSet<usize>,
    /// Objects the rule is allowed to cover.
    allowed: BTreeSet<usize>,
    /// Objects neutral for the approximated set.
    neutral: BTreeSet<usize>,
    conditions: Vec<Condition>,
    not_covering_count: Vec<u32>,
    covered: BTreeSet<usize>,
    /// Multiset of attribute indices with at least one stored condition.
    attribute_counts: HashMap<usize, usize>,
}

impl RuleConditions {
    pub fn new(
        table: Arc<InformationTable>,
        positive: BTreeSet<usize>,
        base: BTreeSet<usize>,
        allowed: BTreeSet<usize>,
        neutral: BTreeSet<usize>,
        rule_type: RuleType,
        semantics: RuleSemantics,
    ) -> Self {
        let n = table.n_objects();
        Self {
            table,
            rule_type,
            semantics,
            positive,
            base,
            allowed,
            neutral,
            conditions: Vec::new(),
            not_covering_count: vec![0; n],
            covered: (0..n).collect(),
            attribute_counts: HashMap::new(),
        }
    }

    pub fn learning_table(&self) -> &Arc<InformationTable> {
        &self.table
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    pub fn positive_objects(&self) -> &BTreeSet<usize> {
        &self.positive
    }

    pub fn base_objects(&self) -> &BTreeSet<usize> {
        &self.base
    }

    pub fn allowed_objects(&self) -> &BTreeSet<usize> {
        &self.allowed
    }

    pub fn neutral_objects(&self) -> &BTreeSet<usize> {
        &self.neutral
    }

    pub fn object_is_positive(&self, object: usize) -> bool {
        self.positive.contains(&object)
    }

    /// Appends a condition, updating the per-object counters and the
    /// covered set by an exact delta. Returns the condition's index.
    pub fn add_condition(&mut self, condition: Condition) -> usize {
        self.apply(&condition);
        self.conditions.push(condition);
        self.conditions.len() - 1
    }

    /// Re-inserts a condition at the given position, e.g. to undo a
    /// tentative removal without disturbing the addition order.
    pub fn insert_condition(&mut self, index: usize, condition: Condition) {
        self.apply(&condition);
        self.conditions.insert(index, condition);
    }

    /// Removes the condition at the given index, reversing its delta.
    ///
    /// Counter monotonicity makes the reversal exact under any removal
    /// order. Panics when the index is out of bounds.
    pub fn remove_condition(&mut self, index: usize) -> Condition {
        let condition = self.conditions.remove(index);
        for object in 0..self.not_covering_count.len() {
            if !condition.satisfied_by(object, &self.table) {
                self.not_covering_count[object] -= 1;
                if self.not_covering_count[object] == 0 {
                    self.covered.insert(object);
                }
            }
        }
        let count = self
            .attribute_counts
            .get_mut(&condition.attribute.attribute_index)
            .expect("attribute multiset tracks every stored condition");
        *count -= 1;
        if *count == 0 {
            self.attribute_counts
                .remove(&condition.attribute.attribute_index);
        }
        condition
    }

    fn apply(&mut self, condition: &Condition) {
        for object in 0..self.not_covering_count.len() {
            if !condition.satisfied_by(object, &self.table) {
                self.not_covering_count[object] += 1;
                if self.not_covering_count[object] == 1 {
                    self.covered.remove(&object);
                }
            }
        }
        *self
            .attribute_counts
            .entry(condition.attribute.attribute_index)
            .or_insert(0) += 1;
    }

    /// O(1) coverage test through the counter.
    pub fn covers(&self, object: usize) -> bool {
        self.not_covering_count[object] == 0
    }

    /// Coverage re-check from the stored conditions; used for verification.
    pub fn covers_by_conditions(&self, object: usize) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.satisfied_by(object, &self.table))
    }

    /// Currently covered objects, ascending.
    pub fn covered_objects(&self) -> &BTreeSet<usize> {
        &self.covered
    }

    /// Covered set after a hypothetical addition of the given condition;
    /// the stored state is untouched.
    pub fn covered_with(&self, condition: &Condition) -> BTreeSet<usize> {
        self.covered
            .iter()
            .copied()
            .filter(|&object| condition.satisfied_by(object, &self.table))
            .collect()
    }

    pub fn has_condition_for_attribute(&self, attribute_index: usize) -> bool {
        self.attribute_counts.contains_key(&attribute_index)
    }

    pub fn contains_condition(&self, condition: &Condition) -> bool {
        self.conditions.contains(condition)
    }

    pub fn condition(&self, index: usize) -> &Condition {
        &self.conditions[index]
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of covered objects that are positive.
    pub fn n_covered_positive(&self) -> usize {
        self.covered
            .iter()
            .filter(|object| self.positive.contains(object))
            .count()
    }

    /// Snapshot of the coverage statistics for rule characteristics.
    pub fn coverage_info(&self) -> RuleCoverageInfo {
        let mut n_positive = 0;
        let mut n_neutral = 0;
        let mut n_negative = 0;
        for object in &self.covered {
            if self.positive.contains(object) {
                n_positive += 1;
            } else if self.neutral.contains(object) {
                n_neutral += 1;
            } else {
                n_negative += 1;
            }
        }
        RuleCoverageInfo {
            covered_objects: self.covered.iter().copied().collect(),
            n_positive_covered: n_positive,
            n_neutral_covered: n_neutral,
            n_negative_covered: n_negative,
        }
    }

    #[cfg(test)]
    pub(crate) fn counters(&self) -> &[u32] {
        &self.not_covering_count
    }
}
