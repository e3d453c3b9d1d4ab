//! VC-DomLEM rule induction.
//!
//! A sequential covering engine over the approximations of ordered-class
//! unions:
//!
//! - [`M4ConditionGenerator`]: picks the best elementary condition,
//!   exploiting evaluator monotonicity to prune the threshold search.
//! - [`StoppingChecker`]: decides when a rule's LHS is good enough.
//! - [`FifoConditionPruner`] / [`CoverageRuleSetPruner`]: drop redundant
//!   conditions and redundant rules.
//! - [`MinimalityChecker`]: rejects rules dominated by already accepted
//!   ones.
//! - [`VcDomLem`]: drives the loop per union and assembles the rule set.
//!
//! The free functions [`induce_rules`], [`induce_rules_with_threshold`],
//! and [`induce_rules_with_characteristics`] wire the default components
//! for the common cases.

mod config;
mod evaluators;
mod generator;
mod minimality;
mod pruners;
mod runner;
mod stopping;

pub use config::{AllowedObjectsKind, VcDomLemConfig};
pub use evaluators::{
    validate_evaluators, ConditionAdditionEvaluator, CoverageRuleEvaluator, EpsilonRuleEvaluator,
    Monotonicity,
};
pub use generator::{ConditionGenerator, M4ConditionGenerator};
pub use minimality::{MinimalityChecker, RuleCandidate};
pub use pruners::{ConditionPruner, CoverageRuleSetPruner, FifoConditionPruner, RuleSetPruner};
pub use runner::{
    induce_rules, induce_rules_with_characteristics, induce_rules_with_threshold, VcDomLem,
};
pub use stopping::{AllowedCoverageStoppingChecker, EvaluationsStoppingChecker, StoppingChecker};
