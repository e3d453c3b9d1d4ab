//! Families of all meaningful unions over a learning table.

use super::calculator::RoughSetCalculator;
use super::union::{Union, UnionKind};
use crate::dominance::DominanceCones;
use crate::error::{DomlemError, Result};
use crate::table::{Decision, InformationTable};
use std::cmp::Ordering;
use std::sync::Arc;

/// All upward and downward unions of a learning table, with complementary
/// unions registered pairwise.
///
/// Upward unions are ordered best-first and downward unions worst-first,
/// the order in which the sequential coverer visits them. The worst class
/// contributes no upward union and the best class no downward union (those
/// would cover the whole object set).
pub struct UnionFamily {
    upward: Vec<Union>,
    downward: Vec<Union>,
}

impl UnionFamily {
    /// Builds the family over the distinct decisions of the table.
    ///
    /// Fails when two distinct decisions are uncomparable: a family requires
    /// a total preference order of the decision classes.
    pub fn new(
        table: Arc<InformationTable>,
        cones: Arc<DominanceCones>,
        calculator: Arc<dyn RoughSetCalculator>,
    ) -> Result<Self> {
        let decisions = ordered_distinct_decisions(&table)?;
        let m = decisions.len();

        let make = |kind: UnionKind, decision: &Decision| -> Result<Union> {
            Union::new(
                kind,
                decision.clone(),
                table.clone(),
                cones.clone(),
                calculator.clone(),
            )
        };

        let mut upward = Vec::new();
        for k in (1..m).rev() {
            let union = make(UnionKind::AtLeast, &decisions[k])?;
            union.set_complementary_union(make(UnionKind::AtMost, &decisions[k - 1])?)?;
            upward.push(union);
        }

        let mut downward = Vec::new();
        for k in 0..m.saturating_sub(1) {
            let union = make(UnionKind::AtMost, &decisions[k])?;
            union.set_complementary_union(make(UnionKind::AtLeast, &decisions[k + 1])?)?;
            downward.push(union);
        }

        Ok(Self { upward, downward })
    }

    /// Upward unions, best limiting class first.
    pub fn upward_unions(&self) -> &[Union] {
        &self.upward
    }

    /// Downward unions, worst limiting class first.
    pub fn downward_unions(&self) -> &[Union] {
        &self.downward
    }

    /// Upward unions followed by downward unions.
    pub fn iter(&self) -> impl Iterator<Item = &Union> {
        self.upward.iter().chain(self.downward.iter())
    }

    pub fn len(&self) -> usize {
        self.upward.len() + self.downward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upward.is_empty() && self.downward.is_empty()
    }
}

/// Distinct decisions of the table, sorted ascending in the preference
/// order; errs when two of them are uncomparable.
fn ordered_distinct_decisions(table: &InformationTable) -> Result<Vec<Decision>> {
    let mut distinct: Vec<(Decision, usize)> = Vec::new();
    for i in 0..table.n_objects() {
        if let Some(decision) = table.decision(i) {
            if !distinct.iter().any(|(d, _)| *d == decision) {
                distinct.push((decision, i));
            }
        }
    }

    // Insertion sort with a fallible comparator.
    let mut ordered: Vec<(Decision, usize)> = Vec::with_capacity(distinct.len());
    for (decision, object) in distinct {
        let mut insert_at = ordered.len();
        for (k, (other, other_object)) in ordered.iter().enumerate() {
            match preference_order(&decision, other).ok_or(DomlemError::UnorderedDecisions {
                first: *other_object,
                second: object,
            })? {
                Ordering::Less => {
                    insert_at = k;
                    break;
                }
                Ordering::Equal | Ordering::Greater => {}
            }
        }
        ordered.insert(insert_at, (decision, object));
    }

    Ok(ordered.into_iter().map(|(decision, _)| decision).collect())
}

/// Total-order comparison of two decisions in the preference order, or
/// `None` when they are uncomparable.
fn preference_order(a: &Decision, b: &Decision) -> Option<Ordering> {
    if a.is_equal_to(b).is_true() {
        Some(Ordering::Equal)
    } else if a.is_at_most_as_good_as(b).is_true() {
        Some(Ordering::Less)
    } else if a.is_at_least_as_good_as(b).is_true() {
        Some(Ordering::Greater)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx::calculator::ClassicalDominanceCalculator;
    use crate::table::{Attribute, EvaluationKind, Field, ValueType};
    use crate::value::{MissingKind, Preference, Value};

    fn context(rows: Vec<(i64, i64)>) -> (Arc<InformationTable>, Arc<DominanceCones>) {
        let attributes = vec![
            Attribute::evaluation(
                "q",
                true,
                EvaluationKind::Condition,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
            Attribute::evaluation(
                "class",
                true,
                EvaluationKind::Decision,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
        ];
        let rows = rows
            .into_iter()
            .map(|(q, class)| {
                vec![
                    Field::Evaluation(Value::Int(q)),
                    Field::Evaluation(Value::Int(class)),
                ]
            })
            .collect();
        let table = Arc::new(InformationTable::new(attributes, rows).unwrap());
        let cones = Arc::new(DominanceCones::compute(&table));
        (table, cones)
    }

    #[test]
    fn test_family_shape_and_order() {
        let (table, cones) = context(vec![(1, 1), (2, 2), (3, 3), (4, 2)]);
        let family =
            UnionFamily::new(table, cones, Arc::new(ClassicalDominanceCalculator)).unwrap();

        // Three classes: two upward unions (>=3, >=2), two downward (<=1, <=2).
        assert_eq!(family.len(), 4);
        let upward: Vec<_> = family
            .upward_unions()
            .iter()
            .map(|u| u.limiting_decision().to_string())
            .collect();
        assert_eq!(upward, vec!["3", "2"]);
        let downward: Vec<_> = family
            .downward_unions()
            .iter()
            .map(|u| u.limiting_decision().to_string())
            .collect();
        assert_eq!(downward, vec!["1", "2"]);
    }

    #[test]
    fn test_family_complements_are_registered() {
        let (table, cones) = context(vec![(1, 1), (2, 2), (3, 3)]);
        let family =
            UnionFamily::new(table.clone(), cones, Arc::new(ClassicalDominanceCalculator))
                .unwrap();

        // Upper approximations resolve through the registered complements.
        for union in family.iter() {
            assert!(union.lower_approximation().is_subset(union.upper_approximation()));
        }
        let at_least_2 = &family.upward_unions()[1];
        assert_eq!(
            at_least_2.complementary_union().objects().iter().copied().collect::<Vec<_>>(),
            vec![0]
        );
    }

    #[test]
    fn test_two_class_family() {
        let (table, cones) = context(vec![(1, 1), (2, 2)]);
        let family =
            UnionFamily::new(table, cones, Arc::new(ClassicalDominanceCalculator)).unwrap();
        assert_eq!(family.upward_unions().len(), 1);
        assert_eq!(family.downward_unions().len(), 1);
    }

    #[test]
    fn test_uncomparable_decisions_rejected() {
        let attributes = vec![
            Attribute::evaluation(
                "q",
                true,
                EvaluationKind::Condition,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
            Attribute::evaluation(
                "class",
                true,
                EvaluationKind::Decision,
                Preference::Gain,
                ValueType::Integer,
                MissingKind::Mv2,
            ),
        ];
        let rows = vec![
            vec![
                Field::Evaluation(Value::Int(1)),
                Field::Evaluation(Value::Int(1)),
            ],
            vec![
                Field::Evaluation(Value::Int(2)),
                Field::Evaluation(Value::Missing(MissingKind::Mv2)),
            ],
        ];
        let table = Arc::new(InformationTable::new(attributes, rows).unwrap());
        let cones = Arc::new(DominanceCones::compute(&table));
        assert!(matches!(
            UnionFamily::new(table, cones, Arc::new(ClassicalDominanceCalculator)),
            Err(DomlemError::UnorderedDecisions { .. })
        ));
    }
}
