//! Attribute metadata: names, kinds, declared value types.

use crate::value::{ElementList, MissingKind, Preference, Value};
use std::sync::Arc;

/// Role of an evaluation attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationKind {
    Condition,
    Decision,
    Description,
}

/// Kind of identifier assigned by an identification attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentificationKind {
    Uuid,
    Text,
}

/// Declared value type of an evaluation attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Integer,
    Real,
    Enumeration(Arc<ElementList>),
    Pair(Box<ValueType>),
}

impl ValueType {
    /// Tells if the given value conforms to this declared type.
    ///
    /// Missing values conform to every simple type declaration; a pair
    /// attribute accepts a pair whose both coordinates conform to the inner
    /// type, or a wholly missing value.
    pub fn conforms(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Missing(_)) => true,
            (ValueType::Integer, Value::Int(_)) => true,
            (ValueType::Real, Value::Real(_)) => true,
            (ValueType::Enumeration(declared), Value::Enum { index, elements }) => {
                (Arc::ptr_eq(declared, elements) || declared == elements)
                    && *index < declared.len()
            }
            (ValueType::Pair(inner), Value::Pair(a, b)) => inner.conforms(a) && inner.conforms(b),
            _ => false,
        }
    }

    /// Tells if values of this type are simple and totally ordered, which
    /// enables the optimized condition search.
    pub fn is_simple(&self) -> bool {
        !matches!(self, ValueType::Pair(_))
    }
}

/// Metadata of an evaluation (condition/decision/description) attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationAttribute {
    pub kind: EvaluationKind,
    pub preference: Preference,
    pub value_type: ValueType,
    pub missing_kind: MissingKind,
}

/// The two families of attributes an information table distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeVariant {
    Evaluation(EvaluationAttribute),
    Identification(IdentificationKind),
}

/// A named, typed column of an information table.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub active: bool,
    pub variant: AttributeVariant,
}

impl Attribute {
    /// Constructs an evaluation attribute.
    pub fn evaluation(
        name: impl Into<String>,
        active: bool,
        kind: EvaluationKind,
        preference: Preference,
        value_type: ValueType,
        missing_kind: MissingKind,
    ) -> Self {
        Self {
            name: name.into(),
            active,
            variant: AttributeVariant::Evaluation(EvaluationAttribute {
                kind,
                preference,
                value_type,
                missing_kind,
            }),
        }
    }

    /// Constructs an identification attribute.
    pub fn identification(name: impl Into<String>, active: bool, kind: IdentificationKind) -> Self {
        Self {
            name: name.into(),
            active,
            variant: AttributeVariant::Identification(kind),
        }
    }

    pub fn as_evaluation(&self) -> Option<&EvaluationAttribute> {
        match &self.variant {
            AttributeVariant::Evaluation(e) => Some(e),
            AttributeVariant::Identification(_) => None,
        }
    }

    pub fn is_active_condition(&self) -> bool {
        self.active
            && matches!(
                &self.variant,
                AttributeVariant::Evaluation(e) if e.kind == EvaluationKind::Condition
            )
    }

    pub fn is_active_decision(&self) -> bool {
        self.active
            && matches!(
                &self.variant,
                AttributeVariant::Evaluation(e) if e.kind == EvaluationKind::Decision
            )
    }

    pub fn is_active_identification(&self) -> bool {
        self.active && matches!(&self.variant, AttributeVariant::Identification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades() -> Arc<ElementList> {
        Arc::new(ElementList::new(vec!["bad", "medium", "good"]))
    }

    #[test]
    fn test_value_type_conformance() {
        assert!(ValueType::Integer.conforms(&Value::Int(1)));
        assert!(!ValueType::Integer.conforms(&Value::Real(1.0)));
        assert!(ValueType::Real.conforms(&Value::Missing(MissingKind::Mv2)));

        let list = grades();
        let declared = ValueType::Enumeration(list.clone());
        assert!(declared.conforms(&Value::enumeration(2, list.clone())));
        assert!(!declared.conforms(&Value::enumeration(3, list)));

        let pair = ValueType::Pair(Box::new(ValueType::Integer));
        assert!(pair.conforms(&Value::pair(Value::Int(1), Value::Int(2))));
        assert!(!pair.conforms(&Value::pair(Value::Int(1), Value::Real(2.0))));
        assert!(pair.conforms(&Value::Missing(MissingKind::Mv15)));
    }

    #[test]
    fn test_attribute_classification() {
        let condition = Attribute::evaluation(
            "price",
            true,
            EvaluationKind::Condition,
            Preference::Cost,
            ValueType::Real,
            MissingKind::Mv2,
        );
        assert!(condition.is_active_condition());
        assert!(!condition.is_active_decision());

        let decision = Attribute::evaluation(
            "class",
            true,
            EvaluationKind::Decision,
            Preference::Gain,
            ValueType::Integer,
            MissingKind::Mv2,
        );
        assert!(decision.is_active_decision());

        let inactive = Attribute::evaluation(
            "note",
            false,
            EvaluationKind::Condition,
            Preference::Gain,
            ValueType::Integer,
            MissingKind::Mv2,
        );
        assert!(!inactive.is_active_condition());

        let id = Attribute::identification("id", true, IdentificationKind::Text);
        assert!(id.is_active_identification());
        assert!(id.as_evaluation().is_none());
    }
}
