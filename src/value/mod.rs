//! Value model: ordered and nominal field values with three-valued comparison.
//!
//! Every cell of an information table holds a [`Value`]: an ordered integer,
//! an ordered real, an element of a shared ordered [`ElementList`], a pair of
//! two values of the same simple subtype, or a missing value with one of two
//! declared semantics ([`MissingKind`]).
//!
//! Comparisons are three-valued ([`Ternary`]): values of mismatched subtypes
//! are neither equal nor different, they are *uncomparable*. Preference-aware
//! comparisons ([`Value::is_at_least_as_good_as`] and friends) additionally
//! flip the "good" direction for cost attributes.

mod ternary;
mod types;

pub use ternary::Ternary;
pub use types::{ElementList, MissingKind, Preference, Value};
