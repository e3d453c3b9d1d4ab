//! Cone enumeration and caching.

use super::distribution::DecisionDistribution;
use crate::table::InformationTable;
use crate::value::{Preference, Ternary};

/// The four cone flavors computed for every object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConeFlavor {
    PositiveStandard,
    NegativeStandard,
    PositiveInverted,
    NegativeInverted,
}

/// Dominance cones of every object of a learning table, with their
/// decision-class distributions. Computed once per table; consumers hold
/// shared references.
#[derive(Debug)]
pub struct DominanceCones {
    positive: Vec<Vec<usize>>,
    negative: Vec<Vec<usize>>,
    positive_inverted: Vec<Vec<usize>>,
    negative_inverted: Vec<Vec<usize>>,
    positive_distributions: Vec<DecisionDistribution>,
    negative_distributions: Vec<DecisionDistribution>,
    positive_inverted_distributions: Vec<DecisionDistribution>,
    negative_inverted_distributions: Vec<DecisionDistribution>,
}

impl DominanceCones {
    /// Materializes all four cones for every object of the table.
    pub fn compute(table: &InformationTable) -> Self {
        let n = table.n_objects();
        let mut positive = vec![Vec::new(); n];
        let mut negative = vec![Vec::new(); n];
        let mut positive_inverted = vec![Vec::new(); n];
        let mut negative_inverted = vec![Vec::new(); n];

        for i in 0..n {
            for j in 0..n {
                // Cones are anchored at i and enumerated in ascending j.
                if relates(table, j, i, ConeFlavor::PositiveStandard) {
                    positive[i].push(j);
                }
                if relates(table, j, i, ConeFlavor::NegativeStandard) {
                    negative[i].push(j);
                }
                if relates(table, j, i, ConeFlavor::PositiveInverted) {
                    positive_inverted[i].push(j);
                }
                if relates(table, j, i, ConeFlavor::NegativeInverted) {
                    negative_inverted[i].push(j);
                }
            }
        }

        let distributions = |cones: &Vec<Vec<usize>>| -> Vec<DecisionDistribution> {
            cones
                .iter()
                .map(|members| DecisionDistribution::of_objects(table, members))
                .collect()
        };

        Self {
            positive_distributions: distributions(&positive),
            negative_distributions: distributions(&negative),
            positive_inverted_distributions: distributions(&positive_inverted),
            negative_inverted_distributions: distributions(&negative_inverted),
            positive,
            negative,
            positive_inverted,
            negative_inverted,
        }
    }

    /// D⁺(i): objects dominating i.
    pub fn positive_cone(&self, i: usize) -> &[usize] {
        &self.positive[i]
    }

    /// D⁻(i): objects dominated by i.
    pub fn negative_cone(&self, i: usize) -> &[usize] {
        &self.negative[i]
    }

    /// D⁺⁻¹(i): objects dominating i under the inverted relation.
    pub fn positive_inverted_cone(&self, i: usize) -> &[usize] {
        &self.positive_inverted[i]
    }

    /// D⁻⁻¹(i): objects dominated by i under the inverted relation.
    pub fn negative_inverted_cone(&self, i: usize) -> &[usize] {
        &self.negative_inverted[i]
    }

    pub fn positive_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.positive_distributions[i]
    }

    pub fn negative_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.negative_distributions[i]
    }

    pub fn positive_inverted_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.positive_inverted_distributions[i]
    }

    pub fn negative_inverted_distribution(&self, i: usize) -> &DecisionDistribution {
        &self.negative_inverted_distributions[i]
    }

    pub fn n_objects(&self) -> usize {
        self.positive.len()
    }
}

/// Tells if object j belongs to the cone of the given flavor anchored at i.
///
/// Standard cones compare from the dominating object's side
/// (`v(j) ⪰ v(i)` resp. `v(i) ⪰ v(j)`); inverted cones phrase the same
/// relation from the anchor's side (`v(i) ⪯ v(j)` resp. `v(j) ⪯ v(i)`).
/// Attributes without preference require three-valued equality.
fn relates(table: &InformationTable, j: usize, i: usize, flavor: ConeFlavor) -> bool {
    let n_criteria = table.n_condition_attributes();
    for q in 0..n_criteria {
        let attribute = table
            .condition_attribute(q)
            .as_evaluation()
            .expect("active condition attribute is an evaluation attribute");
        let preference = attribute.preference;
        let v_i = table.condition_field(i, q);
        let v_j = table.condition_field(j, q);

        let holds = if preference == Preference::None {
            v_j.is_equal_to(v_i)
        } else {
            match flavor {
                ConeFlavor::PositiveStandard => v_j.is_at_least_as_good_as(v_i, preference),
                ConeFlavor::NegativeStandard => v_i.is_at_least_as_good_as(v_j, preference),
                ConeFlavor::PositiveInverted => v_i.is_at_most_as_good_as(v_j, preference),
                ConeFlavor::NegativeInverted => v_j.is_at_most_as_good_as(v_i, preference),
            }
        };
        if holds != Ternary::True {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Attribute, EvaluationKind, Field, ValueType};
    use crate::value::{MissingKind, Preference, Value};

    fn gain_cost_table(rows: Vec<(i64, f64, i64)>) -> InformationTable {
        let attributes = vec![
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
            .map(|(quality, price, class)| {
                vec![
                    Field::Evaluation(Value::Int(quality)),
                    Field::Evaluation(Value::Real(price)),
                    Field::Evaluation(Value::Int(class)),
                ]
            })
            .collect();
        InformationTable::new(attributes, rows).unwrap()
    }

    #[test]
    fn test_cones_on_consistent_data() {
        // Object 0 worst on both criteria, object 2 best on both.
        let table = gain_cost_table(vec![(1, 10.0, 1), (2, 8.0, 2), (3, 5.0, 3)]);
        let cones = DominanceCones::compute(&table);

        assert_eq!(cones.positive_cone(0), &[0, 1, 2]);
        assert_eq!(cones.positive_cone(2), &[2]);
        assert_eq!(cones.negative_cone(0), &[0]);
        assert_eq!(cones.negative_cone(2), &[0, 1, 2]);
    }

    #[test]
    fn test_cones_are_reflexive() {
        let table = gain_cost_table(vec![(1, 1.0, 1), (5, 9.0, 2)]);
        let cones = DominanceCones::compute(&table);
        for i in 0..table.n_objects() {
            assert!(cones.positive_cone(i).contains(&i));
            assert!(cones.negative_cone(i).contains(&i));
            assert!(cones.positive_inverted_cone(i).contains(&i));
            assert!(cones.negative_inverted_cone(i).contains(&i));
        }
    }

    #[test]
    fn test_incomparable_objects_share_no_cone() {
        // Object 0 better on quality, object 1 better on price.
        let table = gain_cost_table(vec![(3, 10.0, 1), (1, 5.0, 2)]);
        let cones = DominanceCones::compute(&table);
        assert_eq!(cones.positive_cone(0), &[0]);
        assert_eq!(cones.positive_cone(1), &[1]);
        assert_eq!(cones.negative_cone(0), &[0]);
        assert_eq!(cones.negative_cone(1), &[1]);
    }

    #[test]
    fn test_mv2_missing_excluded_from_cones() {
        let attributes = vec![
            Attribute::evaluation(
                "quality",
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
                Field::Evaluation(Value::Missing(MissingKind::Mv2)),
                Field::Evaluation(Value::Int(2)),
            ],
        ];
        let table = InformationTable::new(attributes, rows).unwrap();
        let cones = DominanceCones::compute(&table);

        // The conservative missing value keeps object 1 out of object 0's
        // cones and vice versa; only reflexivity remains.
        assert_eq!(cones.positive_cone(0), &[0]);
        assert_eq!(cones.negative_cone(1), &[1]);
        assert_eq!(cones.positive_inverted_cone(0), &[0]);
    }

    #[test]
    fn test_mv15_missing_joins_every_cone() {
        let attributes = vec![
            Attribute::evaluation(
                "quality",
                true,
                EvaluationKind::Condition,
                Preference::Gain,
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
        ];
        let rows = vec![
            vec![
                Field::Evaluation(Value::Int(1)),
                Field::Evaluation(Value::Int(1)),
            ],
            vec![
                Field::Evaluation(Value::Missing(MissingKind::Mv15)),
                Field::Evaluation(Value::Int(2)),
            ],
        ];
        let table = InformationTable::new(attributes, rows).unwrap();
        let cones = DominanceCones::compute(&table);

        assert_eq!(cones.positive_cone(0), &[0, 1]);
        assert_eq!(cones.negative_cone(0), &[0, 1]);
    }

    #[test]
    fn test_distributions_follow_cones() {
        let table = gain_cost_table(vec![(1, 10.0, 1), (2, 8.0, 2), (3, 5.0, 3)]);
        let cones = DominanceCones::compute(&table);

        let distribution = cones.positive_distribution(0);
        assert_eq!(distribution.total(), 3);
        assert_eq!(distribution.count(&table.decision(2).unwrap()), 1);

        let distribution = cones.negative_distribution(1);
        assert_eq!(distribution.total(), 2);
        assert_eq!(distribution.count(&table.decision(2).unwrap()), 0);
    }
}
