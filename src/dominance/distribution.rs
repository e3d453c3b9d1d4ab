//! Decision-class distributions of object sets.

use crate::table::{Decision, InformationTable};
use std::collections::HashMap;

/// Multiset of decisions: how many objects of some set carry each decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionDistribution {
    counts: HashMap<Decision, usize>,
}

impl DecisionDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution of the decisions of the given objects of the table.
    /// Objects without a decision contribute nothing.
    pub fn of_objects(table: &InformationTable, objects: &[usize]) -> Self {
        let mut distribution = Self::new();
        for &object in objects {
            if let Some(decision) = table.decision(object) {
                distribution.increment(decision);
            }
        }
        distribution
    }

    pub fn increment(&mut self, decision: Decision) {
        *self.counts.entry(decision).or_insert(0) += 1;
    }

    /// Number of objects carrying the given decision.
    pub fn count(&self, decision: &Decision) -> usize {
        self.counts.get(decision).copied().unwrap_or(0)
    }

    /// Distinct decisions present in this distribution.
    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.counts.keys()
    }

    /// Total number of counted objects.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Preference, Value};

    #[test]
    fn test_counting() {
        let mut distribution = DecisionDistribution::new();
        let one = Decision::simple(Value::Int(1), 0, Preference::Gain);
        let two = Decision::simple(Value::Int(2), 0, Preference::Gain);

        distribution.increment(one.clone());
        distribution.increment(one.clone());
        distribution.increment(two.clone());

        assert_eq!(distribution.count(&one), 2);
        assert_eq!(distribution.count(&two), 1);
        assert_eq!(
            distribution.count(&Decision::simple(Value::Int(3), 0, Preference::Gain)),
            0
        );
        assert_eq!(distribution.total(), 3);
        assert_eq!(distribution.decisions().count(), 2);
    }
}
