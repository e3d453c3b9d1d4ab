//! Field values and their preference-aware comparisons.

use super::ternary::Ternary;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Preference direction of an attribute.
///
/// On a gain attribute larger values are better; on a cost attribute smaller
/// values are better; an attribute without preference admits only equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    Gain,
    Cost,
    None,
}

/// Semantics of a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingKind {
    /// "Equal to all": compares `True` to every simple value in every
    /// ordered relation and in equality. Acts as a neutral element.
    Mv15,
    /// Conservative: compares `True` only to another missing value and
    /// `Uncomparable` to every known value.
    Mv2,
}

/// Shared, ordered list of enumeration elements.
///
/// Enumeration values reference an element list by index; the position in
/// the list defines the natural order. Two enumeration values are comparable
/// only when they reference equal element lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementList {
    elements: Vec<String>,
}

impl ElementList {
    pub fn new<S: Into<String>>(elements: Vec<S>) -> Self {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of the given element, if present.
    pub fn index_of(&self, element: &str) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    pub fn element(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A single field value of an information table.
#[derive(Debug, Clone)]
pub enum Value {
    /// Ordered integer.
    Int(i64),
    /// Ordered real.
    Real(f64),
    /// Element of a shared ordered element list, ordered by index.
    Enum {
        index: usize,
        elements: Arc<ElementList>,
    },
    /// Pair of two values of the same simple subtype (interval semantics).
    Pair(Box<Value>, Box<Value>),
    /// Missing value with declared semantics.
    Missing(MissingKind),
}

impl Value {
    /// Convenience constructor for enumeration values.
    pub fn enumeration(index: usize, elements: Arc<ElementList>) -> Self {
        Value::Enum { index, elements }
    }

    /// Convenience constructor for pair values.
    pub fn pair(first: Value, second: Value) -> Self {
        Value::Pair(Box::new(first), Box::new(second))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing(_))
    }

    /// Tells if this is a known (non-missing) simple value.
    pub fn is_known_simple(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Real(_) | Value::Enum { .. })
    }

    /// Tells if this is a simple value (known or missing), i.e. not a pair.
    pub fn is_simple(&self) -> bool {
        !matches!(self, Value::Pair(..))
    }

    /// Natural total-order comparison of two known simple values.
    ///
    /// Defined only for matching subtypes (and, for enumerations, equal
    /// element lists); every other combination, including missing values and
    /// pairs, yields `None`. Preference direction plays no role here.
    pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
            (
                Value::Enum {
                    index: a,
                    elements: ea,
                },
                Value::Enum {
                    index: b,
                    elements: eb,
                },
            ) => {
                if Arc::ptr_eq(ea, eb) || ea == eb {
                    Some(a.cmp(b))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Tells if this value is at least as good as `other` under the given
    /// preference direction.
    ///
    /// On a gain attribute this is `>=` in the natural order, on a cost
    /// attribute `<=`; without preference only equality holds. Mismatched
    /// subtypes and pair-vs-simple comparisons are `Uncomparable`; missing
    /// values follow their declared [`MissingKind`].
    pub fn is_at_least_as_good_as(&self, other: &Value, preference: Preference) -> Ternary {
        if let Some(t) = self.missing_comparison(other) {
            return t;
        }
        match (self, other) {
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) => a1
                .is_at_least_as_good_as(b1, preference)
                .and(a2.is_at_most_as_good_as(b2, preference)),
            (Value::Pair(..), _) | (_, Value::Pair(..)) => Ternary::Uncomparable,
            _ => match preference {
                Preference::Gain => self.ordered(other, Ordering::Greater),
                Preference::Cost => self.ordered(other, Ordering::Less),
                Preference::None => self.is_equal_to(other),
            },
        }
    }

    /// Tells if this value is at most as good as `other` under the given
    /// preference direction. Symmetric to [`is_at_least_as_good_as`].
    ///
    /// [`is_at_least_as_good_as`]: Value::is_at_least_as_good_as
    pub fn is_at_most_as_good_as(&self, other: &Value, preference: Preference) -> Ternary {
        if let Some(t) = self.missing_comparison(other) {
            return t;
        }
        match (self, other) {
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) => a1
                .is_at_most_as_good_as(b1, preference)
                .and(a2.is_at_least_as_good_as(b2, preference)),
            (Value::Pair(..), _) | (_, Value::Pair(..)) => Ternary::Uncomparable,
            _ => match preference {
                Preference::Gain => self.ordered(other, Ordering::Less),
                Preference::Cost => self.ordered(other, Ordering::Greater),
                Preference::None => self.is_equal_to(other),
            },
        }
    }

    /// Three-valued equality. Missing values follow their declared kind;
    /// pairs compare coordinate-wise.
    pub fn is_equal_to(&self, other: &Value) -> Ternary {
        if let Some(t) = self.missing_comparison(other) {
            return t;
        }
        match (self, other) {
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) => {
                a1.is_equal_to(b1).and(a2.is_equal_to(b2))
            }
            (Value::Pair(..), _) | (_, Value::Pair(..)) => Ternary::Uncomparable,
            _ => match self.natural_cmp(other) {
                Some(Ordering::Equal) => Ternary::True,
                Some(_) => Ternary::False,
                None => Ternary::Uncomparable,
            },
        }
    }

    /// Negated three-valued equality; uncomparability propagates.
    pub fn is_different_than(&self, other: &Value) -> Ternary {
        self.is_equal_to(other).negated()
    }

    /// Resolves comparisons in which at least one side is missing.
    ///
    /// Returns `None` when both sides are known, leaving the decision to the
    /// ordered/equality logic. The result is the same for every relation:
    /// Mv1.5 is a neutral element, Mv2 matches only other missing values,
    /// and neither is comparable with a pair.
    fn missing_comparison(&self, other: &Value) -> Option<Ternary> {
        if !self.is_missing() && !other.is_missing() {
            return None;
        }
        if matches!(self, Value::Pair(..)) || matches!(other, Value::Pair(..)) {
            return Some(Ternary::Uncomparable);
        }
        let mv15_involved = matches!(self, Value::Missing(MissingKind::Mv15))
            || matches!(other, Value::Missing(MissingKind::Mv15));
        if mv15_involved {
            return Some(Ternary::True);
        }
        // Mv2 on at least one side, no Mv1.5 anywhere.
        if self.is_missing() && other.is_missing() {
            Some(Ternary::True)
        } else {
            Some(Ternary::Uncomparable)
        }
    }

    /// Natural-order relation "self `wanted` other or equal" as a ternary.
    fn ordered(&self, other: &Value, wanted: Ordering) -> Ternary {
        match self.natural_cmp(other) {
            Some(Ordering::Equal) => Ternary::True,
            Some(ordering) if ordering == wanted => Ternary::True,
            Some(_) => Ternary::False,
            None => Ternary::Uncomparable,
        }
    }
}

/// Structural identity used for keying decision distributions.
///
/// This is not the domain equality of [`Value::is_equal_to`]: reals compare
/// by bit pattern and missing values compare by kind.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (
                Value::Enum {
                    index: a,
                    elements: ea,
                },
                Value::Enum {
                    index: b,
                    elements: eb,
                },
            ) => a == b && (Arc::ptr_eq(ea, eb) || ea == eb),
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) => a1 == b1 && a2 == b2,
            (Value::Missing(a), Value::Missing(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Int(v) => {
                0u8.hash(state);
                v.hash(state);
            }
            Value::Real(v) => {
                1u8.hash(state);
                v.to_bits().hash(state);
            }
            Value::Enum { index, elements } => {
                2u8.hash(state);
                index.hash(state);
                elements.len().hash(state);
            }
            Value::Pair(a, b) => {
                3u8.hash(state);
                a.hash(state);
                b.hash(state);
            }
            Value::Missing(kind) => {
                4u8.hash(state);
                kind.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Enum { index, elements } => match elements.element(*index) {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "#{}", index),
            },
            Value::Pair(a, b) => write!(f, "({}, {})", a, b),
            Value::Missing(_) => write!(f, "?"),
        }
    }
}
