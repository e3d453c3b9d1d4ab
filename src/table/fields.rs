//! Field storage: row-shared sub-tables and identification values.

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Identifier assigned to an object by an identification attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Uuid(String),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Uuid(s) | Identifier::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single cell of an information table: either an evaluation value or an
/// object identifier, depending on the column's attribute family.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Evaluation(Value),
    Identification(Identifier),
}

impl Field {
    pub fn as_evaluation(&self) -> Option<&Value> {
        match self {
            Field::Evaluation(v) => Some(v),
            Field::Identification(_) => None,
        }
    }

    pub fn as_identification(&self) -> Option<&Identifier> {
        match self {
            Field::Identification(id) => Some(id),
            Field::Evaluation(_) => None,
        }
    }
}

/// A rectangular block of fields over a subset of the table's columns.
///
/// Rows are reference-counted, so projections share the underlying field
/// arrays instead of copying them; duplicated rows in a projection point at
/// the same storage.
#[derive(Debug, Clone)]
pub struct SubTable<T> {
    rows: Vec<Arc<[T]>>,
}

impl<T: Clone> SubTable<T> {
    pub fn new(rows: Vec<Vec<T>>) -> Self {
        Self {
            rows: rows.into_iter().map(Arc::from).collect(),
        }
    }

    pub fn n_objects(&self) -> usize {
        self.rows.len()
    }

    /// Field of the object at the given row, at the given local column.
    ///
    /// Indices must be in bounds; this is the hot path of every cone test
    /// and condition check.
    pub fn field(&self, object: usize, local_column: usize) -> &T {
        &self.rows[object][local_column]
    }

    pub fn row(&self, object: usize) -> &[T] {
        &self.rows[object]
    }

    /// Projects the given rows (indices may repeat) into a new sub-table
    /// sharing the underlying row storage.
    pub fn select(&self, object_indices: &[usize]) -> SubTable<T> {
        SubTable {
            rows: object_indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

pub type EvaluationSubTable = SubTable<Value>;
