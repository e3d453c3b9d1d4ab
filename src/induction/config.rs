//! VC-DomLEM configuration.
//!
//! [`VcDomLemConfig`] holds the parameters that control rule induction.

use crate::error::{DomlemError, Result};
use crate::rules::RuleType;

/// Which objects a certain rule is allowed to cover, besides the neutral
/// ones. Possible and approximate rules always use their approximation
/// plus the neutral objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedObjectsKind {
    /// The union's positive region.
    PositiveRegion,
    /// The union's positive and boundary regions.
    PositiveAndBoundaryRegions,
    /// Every object of the learning table.
    AnyRegion,
}

/// Configuration of the VC-DomLEM sequential covering algorithm.
///
/// # Defaults
///
/// ```
/// use domlem::induction::VcDomLemConfig;
///
/// let config = VcDomLemConfig::default();
/// assert_eq!(config.consistency_threshold, 0.0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use domlem::induction::{AllowedObjectsKind, VcDomLemConfig};
/// use domlem::rules::RuleType;
///
/// let config = VcDomLemConfig::default()
///     .with_rule_type(RuleType::Possible)
///     .with_consistency_threshold(0.1)
///     .with_allowed_objects(AllowedObjectsKind::AnyRegion);
/// ```
#[derive(Debug, Clone)]
pub struct VcDomLemConfig {
    /// Kind of rules to induce: certain rules from lower approximations,
    /// possible rules from upper approximations, approximate rules from
    /// boundaries.
    pub rule_type: RuleType,

    /// Epsilon threshold shared by the variable-consistency lower
    /// approximations and the rule stopping condition (0.0–1.0).
    ///
    /// 0.0 reproduces the classical DRSA behavior.
    pub consistency_threshold: f64,

    /// Coverage allowance for certain rules.
    pub allowed_objects: AllowedObjectsKind,
}

impl Default for VcDomLemConfig {
    fn default() -> Self {
        Self {
            rule_type: RuleType::Certain,
            consistency_threshold: 0.0,
            allowed_objects: AllowedObjectsKind::PositiveRegion,
        }
    }
}

impl VcDomLemConfig {
    /// Sets the kind of rules to induce.
    pub fn with_rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    /// Sets the consistency threshold.
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    /// Sets the coverage allowance for certain rules.
    pub fn with_allowed_objects(mut self, allowed_objects: AllowedObjectsKind) -> Self {
        self.allowed_objects = allowed_objects;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.consistency_threshold) {
            return Err(DomlemError::InvalidConfig {
                reason: format!(
                    "consistency_threshold must lie in [0, 1], got {}",
                    self.consistency_threshold
                ),
            });
        }
        Ok(())
    }
}
