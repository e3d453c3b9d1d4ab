//! The information table: validated construction, column partition, and
//! identity-preserving row projection.

use super::attribute::{Attribute, AttributeVariant};
use super::decision::Decision;
use super::fields::{EvaluationSubTable, Field, Identifier, SubTable};
use crate::error::{DomlemError, Result};
use crate::value::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide monotonic object id source.
///
/// The only global mutable state in the crate; atomic so that concurrent
/// table constructions still receive distinct ids.
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

fn fresh_object_ids(count: usize) -> Vec<u64> {
    let first = NEXT_OBJECT_ID.fetch_add(count as u64, Ordering::Relaxed);
    (first..first + count as u64).collect()
}

/// Immutable object×attribute store with typed columns.
///
/// Construction validates the attribute set (at most one active decision and
/// at most one active identification attribute) and every row against the
/// declared column types, then partitions the columns into the active
/// condition sub-table, the decision vector, the identification vector, and
/// the remaining supplementary columns.
///
/// The partition is recorded in an encoded per-attribute index map: an
/// active condition attribute with local index `k` encodes `k + 1`, a
/// supplementary attribute encodes `-(k + 1)`, and the active decision and
/// identification attributes encode `0` (their scalar indices are held
/// separately), so [`field`](InformationTable::field) resolves with a single
/// sign check.
#[derive(Debug, Clone)]
pub struct InformationTable {
    attributes: Arc<[Attribute]>,
    attribute_map: Arc<[i32]>,
    condition_global_indices: Arc<[usize]>,
    active_condition: EvaluationSubTable,
    other: SubTable<Field>,
    decisions: Option<Vec<Value>>,
    decision_attribute_index: Option<usize>,
    identifiers: Option<Vec<Identifier>>,
    identification_attribute_index: Option<usize>,
    object_ids: Vec<u64>,
    n_objects: usize,
}

impl InformationTable {
    /// Builds an information table from attribute metadata and object rows.
    pub fn new(attributes: Vec<Attribute>, rows: Vec<Vec<Field>>) -> Result<Self> {
        let mut decision_attribute_index = None;
        let mut identification_attribute_index = None;
        let mut attribute_map = vec![0i32; attributes.len()];
        let mut condition_global_indices = Vec::new();
        let mut other_count = 0usize;

        for (i, attribute) in attributes.iter().enumerate() {
            if attribute.is_active_condition() {
                attribute_map[i] = condition_global_indices.len() as i32 + 1;
                condition_global_indices.push(i);
            } else if attribute.is_active_decision() {
                if let Some(first) = decision_attribute_index {
                    return Err(DomlemError::MultipleActiveDecisionAttributes {
                        first,
                        second: i,
                    });
                }
                decision_attribute_index = Some(i);
            } else if attribute.is_active_identification() {
                if let Some(first) = identification_attribute_index {
                    return Err(DomlemError::MultipleActiveIdentificationAttributes {
                        first,
                        second: i,
                    });
                }
                identification_attribute_index = Some(i);
            } else {
                other_count += 1;
                attribute_map[i] = -(other_count as i32);
            }
        }

        let n_objects = rows.len();
        let mut condition_rows = Vec::with_capacity(n_objects);
        let mut other_rows = Vec::with_capacity(n_objects);
        let mut decisions = decision_attribute_index.map(|_| Vec::with_capacity(n_objects));
        let mut identifiers = identification_attribute_index.map(|_| Vec::with_capacity(n_objects));

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != attributes.len() {
                return Err(DomlemError::RowWidthMismatch {
                    row: row_index,
                    expected: attributes.len(),
                    found: row.len(),
                });
            }

            let mut condition_row = Vec::with_capacity(condition_global_indices.len());
            let mut other_row = Vec::with_capacity(other_count);

            for (i, field) in row.into_iter().enumerate() {
                Self::check_conformance(&attributes[i], &field, row_index, i)?;
                if attribute_map[i] > 0 {
                    match field {
                        Field::Evaluation(value) => condition_row.push(value),
                        Field::Identification(_) => unreachable!("checked by conformance"),
                    }
                } else if Some(i) == decision_attribute_index {
                    match field {
                        Field::Evaluation(value) => {
                            decisions.as_mut().expect("decision column present").push(value)
                        }
                        Field::Identification(_) => unreachable!("checked by conformance"),
                    }
                } else if Some(i) == identification_attribute_index {
                    match field {
                        Field::Identification(id) => {
                            identifiers.as_mut().expect("identification column present").push(id)
                        }
                        Field::Evaluation(_) => unreachable!("checked by conformance"),
                    }
                } else {
                    other_row.push(field);
                }
            }

            condition_rows.push(condition_row);
            other_rows.push(other_row);
        }

        Ok(Self {
            attributes: attributes.into(),
            attribute_map: attribute_map.into(),
            condition_global_indices: condition_global_indices.into(),
            active_condition: SubTable::new(condition_rows),
            other: SubTable::new(other_rows),
            decisions,
            decision_attribute_index,
            identifiers,
            identification_attribute_index,
            object_ids: fresh_object_ids(n_objects),
            n_objects,
        })
    }

    fn check_conformance(
        attribute: &Attribute,
        field: &Field,
        row: usize,
        attribute_index: usize,
    ) -> Result<()> {
        let ok = match (&attribute.variant, field) {
            (AttributeVariant::Evaluation(evaluation), Field::Evaluation(value)) => {
                evaluation.value_type.conforms(value)
            }
            (AttributeVariant::Identification(_), Field::Identification(_)) => true,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(DomlemError::FieldTypeMismatch {
                row,
                attribute: attribute_index,
            })
        }
    }

    pub fn n_objects(&self) -> usize {
        self.n_objects
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Result<&Attribute> {
        self.attributes
            .get(index)
            .ok_or(DomlemError::AttributeIndexOutOfBounds {
                index,
                count: self.attributes.len(),
            })
    }

    /// Globally unique, projection-stable id of the object at `index`.
    pub fn object_id(&self, index: usize) -> u64 {
        self.object_ids[index]
    }

    pub fn object_ids(&self) -> &[u64] {
        &self.object_ids
    }

    /// Field at (object, attribute), resolved through the encoded index map.
    pub fn field(&self, object: usize, attribute: usize) -> Result<Field> {
        if object >= self.n_objects {
            return Err(DomlemError::ObjectIndexOutOfBounds {
                index: object,
                count: self.n_objects,
            });
        }
        let encoded = *self.attribute_map.get(attribute).ok_or(
            DomlemError::AttributeIndexOutOfBounds {
                index: attribute,
                count: self.attributes.len(),
            },
        )?;
        if encoded > 0 {
            let local = (encoded - 1) as usize;
            Ok(Field::Evaluation(
                self.active_condition.field(object, local).clone(),
            ))
        } else if encoded == 0 {
            if Some(attribute) == self.decision_attribute_index {
                let decisions = self.decisions.as_ref().expect("decision column present");
                Ok(Field::Evaluation(decisions[object].clone()))
            } else {
                let identifiers = self.identifiers.as_ref().expect("identification column present");
                Ok(Field::Identification(identifiers[object].clone()))
            }
        } else {
            let local = (-encoded - 1) as usize;
            Ok(self.other.field(object, local).clone())
        }
    }

    /// Number of active condition attributes.
    pub fn n_condition_attributes(&self) -> usize {
        self.condition_global_indices.len()
    }

    /// Translates a local active condition attribute index to the global one.
    pub fn condition_global_index(&self, local: usize) -> usize {
        self.condition_global_indices[local]
    }

    /// Evaluation of an object on the active condition attribute with the
    /// given local index. The hot path of cone tests and condition checks;
    /// indices must be in bounds.
    pub fn condition_field(&self, object: usize, local: usize) -> &Value {
        self.active_condition.field(object, local)
    }

    /// The active condition attribute with the given local index.
    pub fn condition_attribute(&self, local: usize) -> &Attribute {
        &self.attributes[self.condition_global_indices[local]]
    }

    pub fn active_decision_attribute_index(&self) -> Option<usize> {
        self.decision_attribute_index
    }

    pub fn active_identification_attribute_index(&self) -> Option<usize> {
        self.identification_attribute_index
    }

    /// Evaluations on the active decision attribute for all objects, or
    /// `None` when the table has no such attribute.
    pub fn decision_values(&self) -> Option<&[Value]> {
        self.decisions.as_deref()
    }

    /// Decision of the object at `index`, or `None` when the table has no
    /// active decision attribute. Absence is a value, not an error.
    pub fn decision(&self, index: usize) -> Option<Decision> {
        let attribute_index = self.decision_attribute_index?;
        let decisions = self.decisions.as_ref()?;
        let preference = self.attributes[attribute_index]
            .as_evaluation()
            .expect("active decision attribute is an evaluation attribute")
            .preference;
        Some(Decision::simple(
            decisions[index].clone(),
            attribute_index,
            preference,
        ))
    }

    /// Identifier assigned to the object at `index` by the active
    /// identification attribute, if any.
    pub fn identifier(&self, index: usize) -> Option<&Identifier> {
        self.identifiers.as_ref().map(|ids| &ids[index])
    }

    /// Projects the given rows (indices may repeat) into a new table that
    /// shares the underlying field storage and carries the projected ids.
    pub fn select(&self, object_indices: &[usize]) -> Result<InformationTable> {
        for &index in object_indices {
            if index >= self.n_objects {
                return Err(DomlemError::ObjectIndexOutOfBounds {
                    index,
                    count: self.n_objects,
                });
            }
        }
        Ok(Self {
            attributes: self.attributes.clone(),
            attribute_map: self.attribute_map.clone(),
            condition_global_indices: self.condition_global_indices.clone(),
            active_condition: self.active_condition.select(object_indices),
            other: self.other.select(object_indices),
            decisions: self
                .decisions
                .as_ref()
                .map(|d| object_indices.iter().map(|&i| d[i].clone()).collect()),
            decision_attribute_index: self.decision_attribute_index,
            identifiers: self
                .identifiers
                .as_ref()
                .map(|ids| object_indices.iter().map(|&i| ids[i].clone()).collect()),
            identification_attribute_index: self.identification_attribute_index,
            object_ids: object_indices.iter().map(|&i| self.object_ids[i]).collect(),
            n_objects: object_indices.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::attribute::{EvaluationKind, IdentificationKind, ValueType};
    use crate::value::{MissingKind, Preference, Ternary};

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::identification("id", true, IdentificationKind::Text),
            Attribute::evaluation(
                "quality",
                true,
                EvaluationKind::Condition,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
            Attribute::evaluation(
                "price",
                true,
                EvaluationKind::Condition,
                Preference::Cost,
                ValueType::Real,
                MissingKind::Mv2,
            ),
            Attribute::evaluation(
                "note",
                true,
                EvaluationKind::Description,
                Preference::None,
                ValueType::Integer,
                MissingKind::Mv15,
            ),
            Attribute::evaluation(
                "class",
                true,
                EvaluationKind::Decision,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
        ]
    }

    fn row(id: &str, quality: i64, price: f64, note: i64, class: i64) -> Vec<Field> {
        vec![
            Field::Identification(Identifier::Text(id.into())),
            Field::Evaluation(Value::Int(quality)),
            Field::Evaluation(Value::Real(price)),
            Field::Evaluation(Value::Int(note)),
            Field::Evaluation(Value::Int(class)),
        ]
    }

    fn table() -> InformationTable {
        InformationTable::new(
            attributes(),
            vec![
                row("a", 1, 10.0, 0, 1),
                row("b", 2, 8.0, 0, 2),
                row("c", 3, 5.0, 0, 3),
                row("d", 2, 9.0, 0, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_partition() {
        let t = table();
        assert_eq!(t.n_objects(), 4);
        assert_eq!(t.n_attributes(), 5);
        assert_eq!(t.n_condition_attributes(), 2);
        assert_eq!(t.condition_global_index(0), 1);
        assert_eq!(t.condition_global_index(1), 2);
        assert_eq!(t.active_decision_attribute_index(), Some(4));
        assert_eq!(t.active_identification_attribute_index(), Some(0));
    }

    #[test]
    fn test_field_resolution() {
        let t = table();
        assert_eq!(
            t.field(1, 1).unwrap(),
            Field::Evaluation(Value::Int(2))
        );
        assert_eq!(
            t.field(2, 3).unwrap(),
            Field::Evaluation(Value::Int(0))
        );
        assert_eq!(
            t.field(0, 0).unwrap(),
            Field::Identification(Identifier::Text("a".into()))
        );
        assert_eq!(
            t.field(3, 4).unwrap(),
            Field::Evaluation(Value::Int(1))
        );
        assert!(matches!(
            t.field(9, 0),
            Err(DomlemError::ObjectIndexOutOfBounds { .. })
        ));
        assert!(matches!(
            t.field(0, 9),
            Err(DomlemError::AttributeIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_decision_carries_preference() {
        let t = table();
        let d1 = t.decision(0).unwrap();
        let d2 = t.decision(1).unwrap();
        assert_eq!(d2.is_at_least_as_good_as(&d1), Ternary::True);
        assert_eq!(
            t.decision_values().unwrap(),
            &[Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(1)]
        );
    }

    #[test]
    fn test_select_preserves_ids_and_fields() {
        let t = table();
        let projected = t.select(&[2, 0, 2]).unwrap();

        assert_eq!(projected.n_objects(), 3);
        assert_eq!(projected.object_id(0), t.object_id(2));
        assert_eq!(projected.object_id(1), t.object_id(0));
        assert_eq!(projected.object_id(2), t.object_id(2));
        assert_eq!(projected.condition_field(0, 0), &Value::Int(3));
        assert_eq!(projected.condition_field(1, 0), &Value::Int(1));
        assert_eq!(
            projected.identifier(0),
            Some(&Identifier::Text("c".into()))
        );
        assert_eq!(
            projected.decision(2).unwrap(),
            t.decision(2).unwrap()
        );
    }

    #[test]
    fn test_select_rejects_out_of_bounds() {
        let t = table();
        assert!(matches!(
            t.select(&[0, 4]),
            Err(DomlemError::ObjectIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_second_active_decision() {
        let mut attrs = attributes();
        attrs.push(Attribute::evaluation(
            "class2",
            true,
            EvaluationKind::Decision,
            Preference::Gain,
            ValueType::Integer,
            MissingKind::Mv2,
        ));
        assert!(matches!(
            InformationTable::new(attrs, vec![]),
            Err(DomlemError::MultipleActiveDecisionAttributes { first: 4, second: 5 })
        ));
    }

    #[test]
    fn test_rejects_row_width_mismatch() {
        let mut bad = row("a", 1, 10.0, 0, 1);
        bad.pop();
        assert!(matches!(
            InformationTable::new(attributes(), vec![bad]),
            Err(DomlemError::RowWidthMismatch {
                row: 0,
                expected: 5,
                found: 4
            })
        ));
    }

    #[test]
    fn test_rejects_nonconforming_field() {
        let mut bad = row("a", 1, 10.0, 0, 1);
        bad[1] = Field::Evaluation(Value::Real(1.0));
        assert!(matches!(
            InformationTable::new(attributes(), vec![bad]),
            Err(DomlemError::FieldTypeMismatch {
                row: 0,
                attribute: 1
            })
        ));
    }

    #[test]
    fn test_ids_are_distinct_across_tables() {
        let a = table();
        let b = table();
        assert!(a.object_ids().iter().all(|id| !b.object_ids().contains(id)));
    }

    #[test]
    fn test_decision_absent_without_decision_attribute() {
        let attrs = vec![Attribute::evaluation(
            "quality",
            true,
            EvaluationKind::Condition,
            Preference::Gain,
            ValueType::Integer,
            MissingKind::Mv2,
        )];
        let t = InformationTable::new(attrs, vec![vec![Field::Evaluation(Value::Int(1))]]).unwrap();
        assert!(t.decision(0).is_none());
    }
}
