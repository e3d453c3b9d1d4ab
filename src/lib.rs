//! Dominance-based rough set analysis and monotonic decision rule induction.
//!
//! Induces a minimal set of "if…then" decision rules from a table of
//! examples whose decision attribute is ordinal. Implements the
//! Dominance-based Rough Set Approach (DRSA), its variable-consistency
//! extension (VC-DRSA), and the VC-DomLEM sequential covering rule learner:
//!
//! - **Value model** (`value`): ordered integers/reals, enumerations, pair
//!   values, two missing-value semantics, three-valued comparison.
//! - **Information tables** (`table`): column-typed object×attribute stores
//!   with identity-preserving row projection.
//! - **Dominance engine** (`dominance`): per-object dominance cones and
//!   their decision-class distributions.
//! - **Approximations** (`approx`): unions of ordered decision classes,
//!   classical and variable-consistency lower/upper approximations,
//!   positive/negative/boundary regions.
//! - **Consistency measures** (`measures`): object consistency grading,
//!   notably the epsilon measure.
//! - **Rule model** (`rules`): elementary conditions, incrementally
//!   maintained rule conditions, decision rules and rule sets.
//! - **Induction** (`induction`): the VC-DomLEM sequential coverer with an
//!   M4-optimized condition generator, pruners, and minimality checking.
//! - **Data contracts** (`data`): JSON parsing of attribute definitions and
//!   object rows.
//!
//! # Quick Start
//!
//! ```
//! use domlem::data::{parse_attributes, parse_objects};
//! use domlem::induction::induce_rules;
//! use std::sync::Arc;
//!
//! let attributes = parse_attributes(r#"[
//!     { "name": "math", "type": "CONDITION", "preferenceType": "GAIN",
//!       "valueType": "Integer" },
//!     { "name": "class", "type": "DECISION", "preferenceType": "GAIN",
//!       "valueType": "Integer" }
//! ]"#).unwrap();
//! let table = parse_objects(attributes, r#"[
//!     { "math": 2, "class": 1 },
//!     { "math": 5, "class": 2 },
//!     { "math": 8, "class": 3 }
//! ]"#).unwrap();
//!
//! let rules = induce_rules(Arc::new(table)).unwrap();
//! assert!(!rules.is_empty());
//! ```
//!
//! # Architecture
//!
//! The engine is deterministic and single-threaded. Tables, dominance
//! cones, unions, and rules are frozen after construction; approximations
//! and regions are memoised behind one-shot cells. The only global mutable
//! state is an atomic counter handing out stable object ids.

pub mod approx;
pub mod data;
pub mod dominance;
pub mod error;
pub mod induction;
pub mod measures;
pub mod rules;
pub mod table;
pub mod value;
