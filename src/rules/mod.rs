//! Decision rule model: elementary conditions, rule-conditions state, and
//! induced rule sets.
//!
//! [`Condition`] is a single relation between an attribute evaluation and a
//! limiting value. [`RuleConditions`] is the mutable LHS of one rule during
//! induction, maintaining per-object coverage counters under condition
//! addition and removal. [`Rule`] and [`RuleSet`] are the immutable end
//! products, optionally paired with coverage characteristics.

mod condition;
mod rule;
mod rule_conditions;

pub use condition::{AttributeContext, Condition, ConditionForm, Relation, RuleSemantics};
pub use rule::{Rule, RuleCoverageInfo, RuleSet, RuleSetWithCharacteristics, RuleType};
pub use rule_conditions::RuleConditions;
