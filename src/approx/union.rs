//! Unions of ordered decision classes and their rough approximations.

use super::calculator::RoughSetCalculator;
use crate::dominance::{DecisionDistribution, DominanceCones};
use crate::error::{DomlemError, Result};
use crate::table::{Decision, InformationTable};
use crate::value::{Preference, Ternary};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

/// Direction of a union of ordered decision classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionKind {
    /// Upward union: objects whose decision is at least as good as the limit.
    AtLeast,
    /// Downward union: objects whose decision is at most as good as the limit.
    AtMost,
}

impl UnionKind {
    pub fn opposite(self) -> Self {
        match self {
            UnionKind::AtLeast => UnionKind::AtMost,
            UnionKind::AtMost => UnionKind::AtLeast,
        }
    }
}

/// A union of ordered decision classes together with its lazily computed
/// rough approximations and regions.
///
/// Membership, neutral objects, and the complementary side are all derived
/// from three-valued concordance with the limiting decision: an object
/// whose decision is concordant belongs to the union, one whose decision is
/// discordant belongs to the complementary union, and one whose decision is
/// uncomparable with the limit is neutral and belongs to neither.
///
/// Approximations, boundary, and regions are memoised behind one-shot cells
/// and become immutable on first read. A complementary union may be
/// registered explicitly only before the upper approximation is
/// materialized; otherwise a strict complement is derived internally.
pub struct Union {
    kind: UnionKind,
    limiting_decision: Decision,
    table: Arc<InformationTable>,
    cones: Arc<DominanceCones>,
    calculator: Arc<dyn RoughSetCalculator>,
    objects: BTreeSet<usize>,
    neutral: BTreeSet<usize>,
    /// Set for the internally derived strict complement, whose concordance
    /// is the negation of its originator's.
    complement_mode: bool,
    complementary: OnceLock<Box<Union>>,
    lower: OnceLock<BTreeSet<usize>>,
    upper: OnceLock<BTreeSet<usize>>,
    boundary: OnceLock<BTreeSet<usize>>,
    positive_region: OnceLock<BTreeSet<usize>>,
    negative_region: OnceLock<BTreeSet<usize>>,
    boundary_region: OnceLock<BTreeSet<usize>>,
}

impl Union {
    /// Constructs the union of the given kind limited by the given decision.
    ///
    /// Every attribute contributing to the limiting decision must be an
    /// active decision attribute, and at least one of them must be ordinal
    /// (carry a preference direction).
    pub fn new(
        kind: UnionKind,
        limiting_decision: Decision,
        table: Arc<InformationTable>,
        cones: Arc<DominanceCones>,
        calculator: Arc<dyn RoughSetCalculator>,
    ) -> Result<Self> {
        let mut ordinal_contributor = false;
        for attribute_index in limiting_decision.attribute_indices() {
            let attribute = table.attribute(attribute_index)?;
            if !attribute.is_active_decision() {
                return Err(DomlemError::NotActiveDecisionAttribute {
                    attribute: attribute_index,
                });
            }
            let evaluation = attribute
                .as_evaluation()
                .expect("active decision attribute is an evaluation attribute");
            if evaluation.preference != Preference::None {
                ordinal_contributor = true;
            }
        }
        if !ordinal_contributor {
            return Err(DomlemError::NoOrdinalDecisionContributor);
        }

        let mut union = Self::bare(kind, limiting_decision, table, cones, calculator, false);
        union.find_objects();
        Ok(union)
    }

    fn bare(
        kind: UnionKind,
        limiting_decision: Decision,
        table: Arc<InformationTable>,
        cones: Arc<DominanceCones>,
        calculator: Arc<dyn RoughSetCalculator>,
        complement_mode: bool,
    ) -> Self {
        Self {
            kind,
            limiting_decision,
            table,
            cones,
            calculator,
            objects: BTreeSet::new(),
            neutral: BTreeSet::new(),
            complement_mode,
            complementary: OnceLock::new(),
            lower: OnceLock::new(),
            upper: OnceLock::new(),
            boundary: OnceLock::new(),
            positive_region: OnceLock::new(),
            negative_region: OnceLock::new(),
            boundary_region: OnceLock::new(),
        }
    }

    /// Classifies every object of the table by concordance.
    fn find_objects(&mut self) {
        let mut objects = BTreeSet::new();
        let mut neutral = BTreeSet::new();
        for i in 0..self.table.n_objects() {
            if let Some(decision) = self.table.decision(i) {
                match self.concordance(&decision) {
                    Ternary::True => {
                        objects.insert(i);
                    }
                    Ternary::Uncomparable => {
                        neutral.insert(i);
                    }
                    Ternary::False => {}
                }
            }
        }
        self.objects = objects;
        self.neutral = neutral;
    }

    /// Three-valued concordance of a decision with this union.
    ///
    /// `True`: an object with this decision belongs to the union. `False`:
    /// it belongs to the complementary union. `Uncomparable`: it is neutral.
    pub fn concordance(&self, decision: &Decision) -> Ternary {
        let kind = if self.complement_mode {
            self.kind.opposite()
        } else {
            self.kind
        };
        let raw = match kind {
            UnionKind::AtLeast => {
                if self.limiting_decision.is_at_most_as_good_as(decision).is_true() {
                    Ternary::True
                } else if self.limiting_decision.is_at_least_as_good_as(decision).is_true() {
                    Ternary::False
                } else {
                    Ternary::Uncomparable
                }
            }
            UnionKind::AtMost => {
                if self.limiting_decision.is_at_least_as_good_as(decision).is_true() {
                    Ternary::True
                } else if self.limiting_decision.is_at_most_as_good_as(decision).is_true() {
                    Ternary::False
                } else {
                    Ternary::Uncomparable
                }
            }
        };
        if self.complement_mode {
            raw.negated()
        } else {
            raw
        }
    }

    /// Tells if an object with the given decision counts against this union.
    pub fn is_decision_negative(&self, decision: &Decision) -> bool {
        self.concordance(decision) == Ternary::False
    }

    pub fn kind(&self) -> UnionKind {
        self.kind
    }

    pub fn limiting_decision(&self) -> &Decision {
        &self.limiting_decision
    }

    pub fn information_table(&self) -> &Arc<InformationTable> {
        &self.table
    }

    pub fn cones(&self) -> &DominanceCones {
        &self.cones
    }

    /// Indices of the (positive) objects belonging to this union.
    pub fn objects(&self) -> &BTreeSet<usize> {
        &self.objects
    }

    /// Objects whose decision is uncomparable with the limiting decision.
    pub fn neutral_objects(&self) -> &BTreeSet<usize> {
        &self.neutral
    }

    pub fn contains(&self, object: usize) -> bool {
        self.objects.contains(&object)
    }

    pub fn size(&self) -> usize {
        self.objects.len()
    }

    /// Size of the complementary set: all objects minus members and neutral.
    pub fn complementary_set_size(&self) -> usize {
        self.table.n_objects() - self.objects.len() - self.neutral.len()
    }

    /// The dominance cone anchored at `i` that is directed toward this
    /// union: D⁺ for an upward union, D⁻ for a downward one.
    pub fn cone_members(&self, i: usize) -> &[usize] {
        match self.kind {
            UnionKind::AtLeast => self.cones.positive_cone(i),
            UnionKind::AtMost => self.cones.negative_cone(i),
        }
    }

    /// Decision distribution of the cone directed toward this union.
    pub fn cone_distribution(&self, i: usize) -> &DecisionDistribution {
        match self.kind {
            UnionKind::AtLeast => self.cones.positive_distribution(i),
            UnionKind::AtMost => self.cones.negative_distribution(i),
        }
    }

    /// Registers the opposite union complementing this one.
    ///
    /// Accepted only while the upper approximation has not been materialized
    /// and no complementary union has been fixed yet; this keeps the
    /// duality-derived upper approximation consistent.
    pub fn set_complementary_union(&self, union: Union) -> Result<()> {
        if self.upper.get().is_some() {
            return Err(DomlemError::ComplementaryUnionSealed);
        }
        self.complementary
            .set(Box::new(union))
            .map_err(|_| DomlemError::ComplementaryUnionSealed)
    }

    /// The complementary union; derives the strict complement on first use
    /// when none was registered explicitly.
    pub fn complementary_union(&self) -> &Union {
        self.complementary.get_or_init(|| {
            let mut complement = Self::bare(
                self.kind.opposite(),
                self.limiting_decision.clone(),
                self.table.clone(),
                self.cones.clone(),
                self.calculator.clone(),
                !self.complement_mode,
            );
            complement.find_objects();
            Box::new(complement)
        })
    }

    /// Objects certainly belonging to this union under the calculator's
    /// consistency regime.
    pub fn lower_approximation(&self) -> &BTreeSet<usize> {
        self.lower
            .get_or_init(|| self.calculator.lower_approximation(self))
    }

    /// Objects possibly belonging to this union, derived by duality from
    /// the complementary union's lower approximation.
    pub fn upper_approximation(&self) -> &BTreeSet<usize> {
        self.upper
            .get_or_init(|| self.calculator.upper_approximation(self))
    }

    /// Boundary: upper approximation minus lower approximation.
    pub fn boundary(&self) -> &BTreeSet<usize> {
        self.boundary.get_or_init(|| {
            let lower = self.lower_approximation();
            self.upper_approximation()
                .iter()
                .copied()
                .filter(|i| !lower.contains(i))
                .collect()
        })
    }

    /// Positive region: the union of cones anchored at the lower
    /// approximation's members.
    pub fn positive_region(&self) -> &BTreeSet<usize> {
        self.positive_region.get_or_init(|| {
            let mut region = BTreeSet::new();
            for &i in self.lower_approximation() {
                region.extend(self.cone_members(i).iter().copied());
            }
            region
        })
    }

    /// Negative region: the positive region of the complementary union.
    pub fn negative_region(&self) -> &BTreeSet<usize> {
        self.negative_region
            .get_or_init(|| self.complementary_union().positive_region().clone())
    }

    /// Objects in neither the positive nor the negative region.
    pub fn boundary_region(&self) -> &BTreeSet<usize> {
        self.boundary_region.get_or_init(|| {
            let positive = self.positive_region();
            let negative = self.negative_region();
            (0..self.table.n_objects())
                .filter(|i| !positive.contains(i) && !negative.contains(i))
                .collect()
        })
    }

    /// Cardinality of the lower approximation over that of the upper one.
    pub fn accuracy_of_approximation(&self) -> f64 {
        self.lower_approximation().len() as f64 / self.upper_approximation().len() as f64
    }

    /// Cardinality of the lower approximation over the union's size.
    pub fn quality_of_approximation(&self) -> f64 {
        self.lower_approximation().len() as f64 / self.size() as f64
    }
}
