//! Information tables: attribute metadata and column-typed object storage.
//!
//! An [`InformationTable`] is an immutable rectangular matrix of fields with
//! per-column [`Attribute`] metadata. On construction it partitions its
//! columns into the active condition sub-table (used by every calculation),
//! the active decision vector, the active identification vector, and the
//! remaining supplementary columns. Rows carry globally unique ids so that
//! projections ([`InformationTable::select`]) retain object identity.

mod attribute;
mod decision;
mod fields;
mod information;

pub use attribute::{
    Attribute, AttributeVariant, EvaluationAttribute, EvaluationKind, IdentificationKind,
    ValueType,
};
pub use decision::Decision;
pub use fields::{Field, Identifier, SubTable};
pub use information::InformationTable;
