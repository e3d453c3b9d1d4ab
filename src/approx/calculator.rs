//! Rough set calculators: classical DRSA and its variable-consistency
//! extension.

use super::union::Union;
use crate::error::{DomlemError, Result};
use crate::measures::ObjectConsistencyMeasure;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Strategy computing the approximations of a union.
///
/// The upper approximation is shared by both calculators: it is the
/// complement of the lower approximation of the complementary union.
pub trait RoughSetCalculator: Send + Sync {
    /// Objects certainly belonging to the union.
    fn lower_approximation(&self, union: &Union) -> BTreeSet<usize>;

    /// Objects possibly belonging to the union, by duality.
    fn upper_approximation(&self, union: &Union) -> BTreeSet<usize> {
        let n = union.information_table().n_objects();
        let complement_lower = union.complementary_union().lower_approximation();
        (0..n).filter(|i| !complement_lower.contains(i)).collect()
    }
}

/// Classical dominance-based calculator.
///
/// An object of the union enters the lower approximation when the dominance
/// cone directed toward the union stays inside the union and its neutral
/// objects; equivalently, when no decision in the cone's distribution is
/// negative for the union.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalDominanceCalculator;

impl RoughSetCalculator for ClassicalDominanceCalculator {
    fn lower_approximation(&self, union: &Union) -> BTreeSet<usize> {
        union
            .objects()
            .iter()
            .copied()
            .filter(|&i| {
                union
                    .cone_distribution(i)
                    .decisions()
                    .all(|decision| !union.is_decision_negative(decision))
            })
            .collect()
    }
}

/// Variable-consistency dominance-based calculator.
///
/// An object of the union enters the lower approximation when every
/// configured consistency measure meets its threshold for that object.
pub struct VcDominanceCalculator {
    measures: Vec<Arc<dyn ObjectConsistencyMeasure>>,
    thresholds: Vec<f64>,
}

impl VcDominanceCalculator {
    /// Constructs a calculator from parallel lists of measures and
    /// thresholds. At least one measure is required and the lists must
    /// have equal length.
    pub fn new(
        measures: Vec<Arc<dyn ObjectConsistencyMeasure>>,
        thresholds: Vec<f64>,
    ) -> Result<Self> {
        if measures.is_empty() {
            return Err(DomlemError::NoConsistencyMeasures);
        }
        if measures.len() != thresholds.len() {
            return Err(DomlemError::MeasureThresholdCountMismatch {
                measures: measures.len(),
                thresholds: thresholds.len(),
            });
        }
        Ok(Self {
            measures,
            thresholds,
        })
    }

    /// Convenience constructor for the common single-measure case.
    pub fn with_measure(measure: Arc<dyn ObjectConsistencyMeasure>, threshold: f64) -> Self {
        Self {
            measures: vec![measure],
            thresholds: vec![threshold],
        }
    }
}

impl RoughSetCalculator for VcDominanceCalculator {
    fn lower_approximation(&self, union: &Union) -> BTreeSet<usize> {
        union
            .objects()
            .iter()
            .copied()
            .filter(|&i| {
                self.measures
                    .iter()
                    .zip(self.thresholds.iter())
                    .all(|(measure, &threshold)| measure.is_satisfied(i, union, threshold))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::DominanceCones;
    use crate::measures::EpsilonConsistency;
    use crate::table::{Attribute, Decision, EvaluationKind, Field, InformationTable, ValueType};
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

    fn at_least_with(
        class: i64,
        table: &Arc<InformationTable>,
        cones: &Arc<DominanceCones>,
        calculator: Arc<dyn RoughSetCalculator>,
    ) -> Union {
        Union::new(
            super::super::union::UnionKind::AtLeast,
            Decision::simple(Value::Int(class), 1, Preference::Gain),
            table.clone(),
            cones.clone(),
            calculator,
        )
        .unwrap()
    }

    #[test]
    fn test_vc_relaxes_classical_lower() {
        // o2 (q=3, class 1) spoils o1's cone under the classical regime.
        let (table, cones) = context(vec![(1, 1), (2, 2), (3, 1), (4, 2)]);

        let classical = at_least_with(
            2,
            &table,
            &cones,
            Arc::new(ClassicalDominanceCalculator),
        );
        assert_eq!(
            classical.lower_approximation().iter().copied().collect::<Vec<_>>(),
            vec![3]
        );

        // ε(o1) = 1/2 ≤ 0.5, so the VC regime admits o1 as well.
        let vc = at_least_with(
            2,
            &table,
            &cones,
            Arc::new(VcDominanceCalculator::with_measure(
                Arc::new(EpsilonConsistency),
                0.5,
            )),
        );
        assert_eq!(
            vc.lower_approximation().iter().copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert!(vc.lower_approximation().is_subset(vc.upper_approximation()));
    }

    #[test]
    fn test_vc_at_zero_threshold_matches_classical() {
        let (table, cones) = context(vec![(1, 1), (2, 2), (3, 1), (4, 2)]);
        let classical = at_least_with(
            2,
            &table,
            &cones,
            Arc::new(ClassicalDominanceCalculator),
        );
        let vc = at_least_with(
            2,
            &table,
            &cones,
            Arc::new(VcDominanceCalculator::with_measure(
                Arc::new(EpsilonConsistency),
                0.0,
            )),
        );
        assert_eq!(classical.lower_approximation(), vc.lower_approximation());
        assert_eq!(classical.upper_approximation(), vc.upper_approximation());
    }

    #[test]
    fn test_vc_constructor_validation() {
        assert!(matches!(
            VcDominanceCalculator::new(vec![], vec![]),
            Err(DomlemError::NoConsistencyMeasures)
        ));
        assert!(matches!(
            VcDominanceCalculator::new(vec![Arc::new(EpsilonConsistency)], vec![0.0, 0.1]),
            Err(DomlemError::MeasureThresholdCountMismatch {
                measures: 1,
                thresholds: 2
            })
        ));
    }
}
