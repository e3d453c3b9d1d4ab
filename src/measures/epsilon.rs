//! Epsilon object consistency measure.

use super::{MeasureSense, ObjectConsistencyMeasure};
use crate::approx::{Union, UnionKind};

/// Epsilon consistency of an object with respect to a union.
///
/// Counts the objects of the counting cone anchored at the object whose
/// decision is negative for the union, relative to the size of the union's
/// complement. The counting cone is the positive inverted cone for an
/// upward union and the negative cone for a downward one.
///
/// Cost sense: 0.0 is fully consistent, 1.0 the worst. When the complement
/// is empty the measure degenerates to 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonConsistency;

impl EpsilonConsistency {
    pub const BEST: f64 = 0.0;
    pub const WORST: f64 = 1.0;
}

impl ObjectConsistencyMeasure for EpsilonConsistency {
    fn consistency(&self, object: usize, union: &Union) -> f64 {
        let distribution = match union.kind() {
            UnionKind::AtLeast => union.cones().positive_inverted_distribution(object),
            UnionKind::AtMost => union.cones().negative_distribution(object),
        };

        let negative_count: usize = distribution
            .decisions()
            .filter(|decision| union.is_decision_negative(decision))
            .map(|decision| distribution.count(decision))
            .sum();

        let complement_size = union.complementary_set_size();
        if complement_size == 0 {
            return Self::BEST;
        }
        negative_count as f64 / complement_size as f64
    }

    fn sense(&self) -> MeasureSense {
        MeasureSense::Cost
    }
}
