//! Dominance cones over the active condition criteria.
//!
//! For every object of a learning table, four cones are materialized: the
//! positive and negative cones under the standard dominance relation and
//! under the inverted one (the two phrasings differ only in how missing
//! values enter the per-attribute comparison). Each cone also records the
//! multiset of decisions of its members, the decision-class distribution,
//! which drives both the rough approximations and the epsilon consistency
//! measure.

mod cones;
mod distribution;

pub use cones::DominanceCones;
pub use distribution::DecisionDistribution;
