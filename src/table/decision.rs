//! Object decisions: the tuple of active decision values of one object.

use crate::value::{Preference, Ternary, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One contribution of an active decision attribute to a decision.
#[derive(Debug, Clone)]
struct DecisionPart {
    attribute_index: usize,
    value: Value,
    preference: Preference,
}

/// The decision of one object.
///
/// Usually a single value of the only active decision attribute
/// ([`Decision::simple`]), but the design admits composite decisions over
/// several decision attributes; comparisons are then componentwise.
#[derive(Debug, Clone)]
pub struct Decision {
    parts: Vec<DecisionPart>,
}

impl Decision {
    /// Constructs a decision contributed by a single attribute.
    pub fn simple(value: Value, attribute_index: usize, preference: Preference) -> Self {
        Self {
            parts: vec![DecisionPart {
                attribute_index,
                value,
                preference,
            }],
        }
    }

    /// Constructs a composite decision. Contributions are sorted by
    /// attribute index so that structurally equal decisions compare equal.
    pub fn composite(parts: Vec<(usize, Value, Preference)>) -> Self {
        let mut parts: Vec<DecisionPart> = parts
            .into_iter()
            .map(|(attribute_index, value, preference)| DecisionPart {
                attribute_index,
                value,
                preference,
            })
            .collect();
        parts.sort_by_key(|p| p.attribute_index);
        Self { parts }
    }

    /// Indices of the attributes contributing to this decision.
    pub fn attribute_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.parts.iter().map(|p| p.attribute_index)
    }

    /// Value contributed by the attribute with the given index, if any.
    pub fn value_for(&self, attribute_index: usize) -> Option<&Value> {
        self.parts
            .iter()
            .find(|p| p.attribute_index == attribute_index)
            .map(|p| &p.value)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Componentwise "at least as good" comparison.
    ///
    /// Decisions over different attribute sets are uncomparable. Otherwise
    /// every contribution is compared under its attribute's preference and
    /// the results are conjoined with propagating uncomparability.
    pub fn is_at_least_as_good_as(&self, other: &Decision) -> Ternary {
        self.componentwise(other, |a, b, pref| a.is_at_least_as_good_as(b, pref))
    }

    /// Componentwise "at most as good" comparison; dual of
    /// [`is_at_least_as_good_as`](Decision::is_at_least_as_good_as).
    pub fn is_at_most_as_good_as(&self, other: &Decision) -> Ternary {
        self.componentwise(other, |a, b, pref| a.is_at_most_as_good_as(b, pref))
    }

    /// Componentwise three-valued equality.
    pub fn is_equal_to(&self, other: &Decision) -> Ternary {
        self.componentwise(other, |a, b, _| a.is_equal_to(b))
    }

    fn componentwise<F>(&self, other: &Decision, compare: F) -> Ternary
    where
        F: Fn(&Value, &Value, Preference) -> Ternary,
    {
        if self.parts.len() != other.parts.len() {
            return Ternary::Uncomparable;
        }
        let mut result = Ternary::True;
        for (a, b) in self.parts.iter().zip(other.parts.iter()) {
            if a.attribute_index != b.attribute_index {
                return Ternary::Uncomparable;
            }
            result = result.and(compare(&a.value, &b.value, a.preference));
        }
        result
    }
}

/// Structural identity over (attribute index, value) pairs; the preference
/// is determined by the attribute and takes no part.
impl PartialEq for Decision {
    fn eq(&self, other: &Self) -> bool {
        self.parts.len() == other.parts.len()
            && self
                .parts
                .iter()
                .zip(other.parts.iter())
                .all(|(a, b)| a.attribute_index == b.attribute_index && a.value == b.value)
    }
}

impl Eq for Decision {}

impl Hash for Decision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for part in &self.parts {
            part.attribute_index.hash(state);
            part.value.hash(state);
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", part.value)?;
        }
        Ok(())
    }
}
