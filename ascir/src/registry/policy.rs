//! Declarative view and dtype propagation for simple operators.
//!
//! One policy per output. Operators that use these skip symbol-based
//! inference entirely.
use serde::Serialize;

use crate::dtype::DataType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewPolicy {
    /// Output view equals the view of input `input`.
    Elewise { input: usize },
    /// Output view is input `input` reduced along the axes held by attribute `axis_attr`.
    Reduce { input: usize, axis_attr: String },
    /// Output view is the broadcast of every input view.
    Broadcast,
}

impl ViewPolicy {
    pub fn elewise(input: usize) -> Self {
        ViewPolicy::Elewise { input }
    }

    pub fn reduce(input: usize, axis_attr: &str) -> Self {
        ViewPolicy::Reduce {
            input,
            axis_attr: axis_attr.to_string(),
        }
    }

    pub fn input_index(&self) -> Option<usize> {
        match self {
            ViewPolicy::Elewise { input } | ViewPolicy::Reduce { input, .. } => Some(*input),
            ViewPolicy::Broadcast => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DtypePolicy {
    /// Copy the dtype of input N.
    SameAsInput(usize),
    /// Widen the dtype of input N with [`DataType::promoted`].
    Promote(usize),
    /// Always the given dtype.
    Fixed(DataType),
}

impl DtypePolicy {
    pub fn input_index(self) -> Option<usize> {
        match self {
            DtypePolicy::SameAsInput(index) | DtypePolicy::Promote(index) => Some(index),
            DtypePolicy::Fixed(_) => None,
        }
    }

    pub fn apply(self, inputs: &[DataType]) -> Option<DataType> {
        match self {
            DtypePolicy::SameAsInput(index) => inputs.get(index).copied(),
            DtypePolicy::Promote(index) => inputs.get(index).map(|dtype| dtype.promoted()),
            DtypePolicy::Fixed(dtype) => Some(dtype),
        }
    }
}
