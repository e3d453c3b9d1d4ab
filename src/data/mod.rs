//! JSON data contracts: attribute definitions and object rows.
//!
//! Attributes parse from a JSON array of definition objects; objects parse
//! from a JSON array keyed by attribute name, with a configurable marker
//! (default `"?"`) standing for a missing value. Both parsers surface shape
//! problems as typed errors.

mod attributes;
mod objects;

pub use attributes::parse_attributes;
pub use objects::{parse_objects, parse_objects_with_missing, DEFAULT_MISSING_MARKER};
