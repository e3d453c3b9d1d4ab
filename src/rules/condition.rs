//! Elementary conditions on single attributes.

use crate::table::{Field, InformationTable};
use crate::value::{MissingKind, Preference, Ternary, Value};
use std::fmt;

/// Relation between an object's evaluation and the limiting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    AtLeast,
    AtMost,
    Equal,
}

/// Phrasing of a condition.
///
/// Certain rules state "the evaluation relates to the threshold"
/// (threshold-vs-object); possible rules assert the mirrored phrasing
/// (object-vs-threshold). Both share the same satisfaction semantics and
/// differ in rendering and rule-type bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionForm {
    ThresholdVsObject,
    ObjectVsThreshold,
}

/// An attribute together with the contextual data a condition needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeContext {
    /// Global index of the attribute in its information table.
    pub attribute_index: usize,
    /// Local index among the active condition attributes; `None` for
    /// conditions on other attributes, e.g. the decision part of a rule.
    pub local_index: Option<usize>,
    pub name: String,
    pub preference: Preference,
    pub missing_kind: MissingKind,
}

impl AttributeContext {
    /// Context of the active condition attribute with the given local index.
    pub fn from_table(table: &InformationTable, local_index: usize) -> Self {
        let attribute_index = table.condition_global_index(local_index);
        let attribute = table.condition_attribute(local_index);
        let evaluation = attribute
            .as_evaluation()
            .expect("active condition attribute is an evaluation attribute");
        Self {
            attribute_index,
            local_index: Some(local_index),
            name: attribute.name.clone(),
            preference: evaluation.preference,
            missing_kind: evaluation.missing_kind,
        }
    }

    /// Context of an arbitrary evaluation attribute, resolved through the
    /// table's general field access. Used for rule decision parts.
    pub fn from_attribute(table: &InformationTable, attribute_index: usize) -> crate::error::Result<Self> {
        let attribute = table.attribute(attribute_index)?;
        let evaluation = attribute.as_evaluation().ok_or(
            crate::error::DomlemError::NotActiveDecisionAttribute {
                attribute: attribute_index,
            },
        )?;
        Ok(Self {
            attribute_index,
            local_index: None,
            name: attribute.name.clone(),
            preference: evaluation.preference,
            missing_kind: evaluation.missing_kind,
        })
    }
}

/// An elementary condition: a relation between an object's evaluation on
/// one attribute and a limiting value. Value semantics; duplication is a
/// plain clone.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: AttributeContext,
    pub relation: Relation,
    pub form: ConditionForm,
    pub limit: Value,
}

impl Condition {
    pub fn new(
        attribute: AttributeContext,
        relation: Relation,
        form: ConditionForm,
        limit: Value,
    ) -> Self {
        Self {
            attribute,
            relation,
            form,
            limit,
        }
    }

    /// Builds the condition a rule of the given type and semantics places
    /// on the given attribute.
    ///
    /// The relation conflates the rule's semantics with the attribute's
    /// preference direction; possible rules use the object-vs-threshold
    /// phrasing of the same relation. Every combination is mapped
    /// explicitly.
    pub fn for_rule(
        certain: bool,
        semantics: RuleSemantics,
        attribute: AttributeContext,
        limit: Value,
    ) -> Self {
        let form = if certain {
            ConditionForm::ThresholdVsObject
        } else {
            ConditionForm::ObjectVsThreshold
        };
        let relation = match (semantics, attribute.preference) {
            (RuleSemantics::AtLeast, Preference::Gain) => Relation::AtLeast,
            (RuleSemantics::AtLeast, Preference::Cost) => Relation::AtMost,
            (RuleSemantics::AtLeast, Preference::None) => Relation::Equal,
            (RuleSemantics::AtMost, Preference::Gain) => Relation::AtMost,
            (RuleSemantics::AtMost, Preference::Cost) => Relation::AtLeast,
            (RuleSemantics::AtMost, Preference::None) => Relation::Equal,
            (RuleSemantics::Equal, _) => Relation::Equal,
        };
        Self::new(attribute, relation, form, limit)
    }

    /// Tells if the given evaluation satisfies this condition.
    ///
    /// A missing evaluation satisfies every condition under Mv1.5 semantics
    /// and none under Mv2; known evaluations compare in the natural order
    /// of the attribute's value set.
    pub fn satisfied_by_value(&self, evaluation: &Value) -> bool {
        if evaluation.is_missing() {
            return self.attribute.missing_kind == MissingKind::Mv15;
        }
        let outcome = match self.relation {
            Relation::AtLeast => evaluation.is_at_least_as_good_as(&self.limit, Preference::Gain),
            Relation::AtMost => evaluation.is_at_most_as_good_as(&self.limit, Preference::Gain),
            Relation::Equal => evaluation.is_equal_to(&self.limit),
        };
        outcome == Ternary::True
    }

    /// Tells if the object of the given table satisfies this condition.
    pub fn satisfied_by(&self, object: usize, table: &InformationTable) -> bool {
        match self.attribute.local_index {
            Some(local) => self.satisfied_by_value(table.condition_field(object, local)),
            None => match table.field(object, self.attribute.attribute_index) {
                Ok(Field::Evaluation(value)) => self.satisfied_by_value(&value),
                _ => false,
            },
        }
    }

    /// Tells if this condition is at least as restrictive as `other`:
    /// same attribute, relation, and form, with a limit that implies the
    /// other's. Used by the minimality check.
    pub fn implies(&self, other: &Condition) -> bool {
        if self.attribute.attribute_index != other.attribute.attribute_index
            || self.relation != other.relation
            || self.form != other.form
        {
            return false;
        }
        let outcome = match self.relation {
            Relation::AtLeast => self.limit.is_at_least_as_good_as(&other.limit, Preference::Gain),
            Relation::AtMost => self.limit.is_at_most_as_good_as(&other.limit, Preference::Gain),
            Relation::Equal => self.limit.is_equal_to(&other.limit),
        };
        outcome == Ternary::True
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.relation {
            Relation::AtLeast => ">=",
            Relation::AtMost => "<=",
            Relation::Equal => "=",
        };
        match self.form {
            ConditionForm::ThresholdVsObject => {
                write!(f, "{} {} {}", self.attribute.name, symbol, self.limit)
            }
            ConditionForm::ObjectVsThreshold => {
                let mirrored = match self.relation {
                    Relation::AtLeast => "<=",
                    Relation::AtMost => ">=",
                    Relation::Equal => "=",
                };
                write!(f, "{} {} {}", self.limit, mirrored, self.attribute.name)
            }
        }
    }
}

/// Semantics of a rule's decision part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSemantics {
    AtLeast,
    AtMost,
    Equal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gain_context() -> AttributeContext {
        AttributeContext {
            attribute_index: 0,
            local_index: Some(0),
            name: "q".into(),
            preference: Preference::Gain,
            missing_kind: MissingKind::Mv2,
        }
    }

    fn cost_context() -> AttributeContext {
        AttributeContext {
            preference: Preference::Cost,
            name: "price".into(),
            ..gain_context()
        }
    }

    #[test]
    fn test_relation_selection_for_certain_rules() {
        let c = Condition::for_rule(true, RuleSemantics::AtLeast, gain_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtLeast);
        assert_eq!(c.form, ConditionForm::ThresholdVsObject);

        let c = Condition::for_rule(true, RuleSemantics::AtLeast, cost_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtMost);

        let c = Condition::for_rule(true, RuleSemantics::AtMost, gain_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtMost);

        let c = Condition::for_rule(true, RuleSemantics::AtMost, cost_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtLeast);

        let nominal = AttributeContext {
            preference: Preference::None,
            ..gain_context()
        };
        let c = Condition::for_rule(true, RuleSemantics::AtLeast, nominal, Value::Int(3));
        assert_eq!(c.relation, Relation::Equal);
    }

    #[test]
    fn test_possible_rules_use_mirrored_phrasing() {
        let c = Condition::for_rule(false, RuleSemantics::AtLeast, gain_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtLeast);
        assert_eq!(c.form, ConditionForm::ObjectVsThreshold);

        let c = Condition::for_rule(false, RuleSemantics::AtMost, cost_context(), Value::Int(3));
        assert_eq!(c.relation, Relation::AtLeast);
        assert_eq!(c.form, ConditionForm::ObjectVsThreshold);
    }

    #[test]
    fn test_satisfaction_in_natural_order() {
        let at_least = Condition::new(
            gain_context(),
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert!(at_least.satisfied_by_value(&Value::Int(3)));
        assert!(at_least.satisfied_by_value(&Value::Int(5)));
        assert!(!at_least.satisfied_by_value(&Value::Int(2)));

        let at_most = Condition::new(
            cost_context(),
            Relation::AtMost,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert!(at_most.satisfied_by_value(&Value::Int(3)));
        assert!(!at_most.satisfied_by_value(&Value::Int(4)));
    }

    #[test]
    fn test_missing_satisfaction_follows_declared_kind() {
        let tolerant = AttributeContext {
            missing_kind: MissingKind::Mv15,
            ..gain_context()
        };
        let c = Condition::new(
            tolerant,
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert!(c.satisfied_by_value(&Value::Missing(MissingKind::Mv15)));

        let strict = Condition::new(
            gain_context(),
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert!(!strict.satisfied_by_value(&Value::Missing(MissingKind::Mv2)));
    }

    #[test]
    fn test_implication() {
        let make = |limit: i64| {
            Condition::new(
                gain_context(),
                Relation::AtLeast,
                ConditionForm::ThresholdVsObject,
                Value::Int(limit),
            )
        };
        assert!(make(5).implies(&make(3)));
        assert!(make(3).implies(&make(3)));
        assert!(!make(2).implies(&make(3)));

        let at_most = Condition::new(
            gain_context(),
            Relation::AtMost,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert!(!at_most.implies(&make(3)));
    }

    #[test]
    fn test_display() {
        let c = Condition::new(
            gain_context(),
            Relation::AtLeast,
            ConditionForm::ThresholdVsObject,
            Value::Int(3),
        );
        assert_eq!(c.to_string(), "q >= 3");

        let c = Condition::new(
            gain_context(),
            Relation::AtLeast,
            ConditionForm::ObjectVsThreshold,
            Value::Int(3),
        );
        assert_eq!(c.to_string(), "3 <= q");
    }
}
