//! Error types for table construction, approximation, and rule induction.

use thiserror::Error;

/// Crate-wide error type.
///
/// Structural misconfiguration (invalid tables, mismatched measure lists)
/// is fatal at the boundary of the offending operation. The only variant
/// that is recoverable by design is [`ElementaryConditionNotFound`],
/// which the induction loop catches to finish the current rule.
///
/// [`ElementaryConditionNotFound`]: DomlemError::ElementaryConditionNotFound
#[derive(Error, Debug)]
pub enum DomlemError {
    #[error("more than one active decision attribute (attributes {first} and {second})")]
    MultipleActiveDecisionAttributes { first: usize, second: usize },

    #[error("more than one active identification attribute (attributes {first} and {second})")]
    MultipleActiveIdentificationAttributes { first: usize, second: usize },

    #[error("row {row} has {found} fields but the table declares {expected} attributes")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("field at row {row}, attribute {attribute} does not conform to the attribute's declared type")]
    FieldTypeMismatch { row: usize, attribute: usize },

    #[error("object index {index} out of bounds (table has {count} objects)")]
    ObjectIndexOutOfBounds { index: usize, count: usize },

    #[error("attribute index {index} out of bounds (table has {count} attributes)")]
    AttributeIndexOutOfBounds { index: usize, count: usize },

    #[error("attribute {attribute} contributing to the limiting decision is not an active decision attribute")]
    NotActiveDecisionAttribute { attribute: usize },

    #[error("no attribute contributing to the limiting decision is an ordinal active decision attribute")]
    NoOrdinalDecisionContributor,

    #[error("variable-consistency calculator requires at least one consistency measure")]
    NoConsistencyMeasures,

    #[error("{measures} consistency measures paired with {thresholds} thresholds")]
    MeasureThresholdCountMismatch { measures: usize, thresholds: usize },

    #[error("condition addition evaluator list is empty")]
    NoConditionEvaluators,

    #[error("condition addition evaluators switch monotonicity type more than once")]
    MonotonicitySwitchedTwice,

    #[error("complementary union can no longer be set: it is already fixed or the upper approximation has been materialized")]
    ComplementaryUnionSealed,

    #[error("decision classes are not totally ordered: decisions of objects {first} and {second} are uncomparable")]
    UnorderedDecisions { first: usize, second: usize },

    #[error("no elementary condition can be added to the current rule conditions")]
    ElementaryConditionNotFound,

    #[error("invalid induction configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("attribute '{name}': {reason}")]
    InvalidAttributeDefinition { name: String, reason: String },

    #[error("object {row}: {reason}")]
    InvalidObjectDefinition { row: usize, reason: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DomlemError>;
