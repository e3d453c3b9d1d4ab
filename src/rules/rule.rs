//! Decision rules, rule sets, and coverage statistics.

use super::condition::{Condition, RuleSemantics};
use crate::table::InformationTable;
use std::fmt;

/// Kind of approximation a rule was induced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// Induced from a lower approximation.
    Certain,
    /// Induced from an upper approximation.
    Possible,
    /// Induced from a boundary.
    Approximate,
}

/// A decision rule: conditions on the LHS connected by "and", decisions on
/// the RHS connected by "or". Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    rule_type: RuleType,
    semantics: RuleSemantics,
    conditions: Vec<Condition>,
    decisions: Vec<Condition>,
}

impl Rule {
    pub fn new(
        rule_type: RuleType,
        semantics: RuleSemantics,
        conditions: Vec<Condition>,
        decisions: Vec<Condition>,
    ) -> Self {
        Self {
            rule_type,
            semantics,
            conditions,
            decisions,
        }
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn semantics(&self) -> RuleSemantics {
        self.semantics
    }

    /// Conditions in the order they were added during induction.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn decisions(&self) -> &[Condition] {
        &self.decisions
    }

    /// Tells if the object of the given table satisfies every condition.
    pub fn covers(&self, object: usize, table: &InformationTable) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.satisfied_by(object, table))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            write!(f, "true")?;
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{}", condition)?;
        }
        write!(f, " => ")?;
        for (i, decision) in self.decisions.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", decision)?;
        }
        Ok(())
    }
}

/// Per-rule coverage bookkeeping frozen when the rule is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCoverageInfo {
    /// Objects of the learning table covered by the rule, ascending.
    pub covered_objects: Vec<usize>,
    /// How many covered objects are positive for the rule.
    pub n_positive_covered: usize,
    /// How many covered objects are neutral for the rule.
    pub n_neutral_covered: usize,
    /// How many covered objects count against the rule.
    pub n_negative_covered: usize,
}

impl RuleCoverageInfo {
    pub fn support(&self) -> usize {
        self.n_positive_covered
    }

    /// Covered positives over all covered, ignoring neutral objects.
    pub fn confidence(&self) -> f64 {
        let counted = self.n_positive_covered + self.n_negative_covered;
        if counted == 0 {
            return 0.0;
        }
        self.n_positive_covered as f64 / counted as f64
    }
}

/// An immutable collection of decision rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &Rule {
        &self.rules[index]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Concatenates two rule sets into a new one.
    pub fn join(self, other: RuleSet) -> RuleSet {
        let mut rules = self.rules;
        rules.extend(other.rules);
        RuleSet { rules }
    }
}

/// A rule set carrying per-rule coverage characteristics.
#[derive(Debug, Clone, Default)]
pub struct RuleSetWithCharacteristics {
    rules: Vec<Rule>,
    characteristics: Vec<RuleCoverageInfo>,
}

impl RuleSetWithCharacteristics {
    /// Both lists are parallel: the i-th characteristics describe the i-th
    /// rule.
    pub fn new(rules: Vec<Rule>, characteristics: Vec<RuleCoverageInfo>) -> Self {
        debug_assert_eq!(rules.len(), characteristics.len());
        Self {
            rules,
            characteristics,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn characteristics(&self, index: usize) -> &RuleCoverageInfo {
        &self.characteristics[index]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drops the characteristics, keeping the plain rule set.
    pub fn into_rule_set(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }

    pub fn join(self, other: RuleSetWithCharacteristics) -> RuleSetWithCharacteristics {
        let mut rules = self.rules;
        let mut characteristics = self.characteristics;
        rules.extend(other.rules);
        characteristics.extend(other.characteristics);
        RuleSetWithCharacteristics {
            rules,
            characteristics,
        }
    }
}
