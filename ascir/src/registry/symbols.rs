//! Type-constraint store.
//!
//! A symbol is a named type variable shared by one or more operator slots.
//! Each symbol carries the dtypes it may take, either as an unordered set
//! (any member is independently legal) or as an ordered list whose n-th
//! entries across all symbols of the operator form one legal combination.
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::dtype::DataType;
use crate::error::AscIrError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeConstraint {
    Set(BTreeSet<DataType>),
    Ordered(Vec<DataType>),
}

impl TypeConstraint {
    pub fn set<I: IntoIterator<Item = DataType>>(dtypes: I) -> Self {
        TypeConstraint::Set(dtypes.into_iter().collect())
    }

    pub fn ordered<I: IntoIterator<Item = DataType>>(dtypes: I) -> Self {
        TypeConstraint::Ordered(dtypes.into_iter().collect())
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, TypeConstraint::Ordered(_))
    }

    /// Distinct legal dtypes regardless of mode.
    pub fn legal_set(&self) -> BTreeSet<DataType> {
        match self {
            TypeConstraint::Set(set) => set.clone(),
            TypeConstraint::Ordered(list) => list.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypeConstraint::Set(set) => set.len(),
            TypeConstraint::Ordered(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A type variable and the slot positions that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolicType {
    pub name: String,
    pub constraint: Option<TypeConstraint>,
    pub input_indices: Vec<usize>,
    pub output_indices: Vec<usize>,
}

impl SymbolicType {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            constraint: None,
            input_indices: Vec::new(),
            output_indices: Vec::new(),
        }
    }

    pub fn is_input_bound(&self) -> bool {
        !self.input_indices.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolStore {
    symbols: BTreeMap<String, SymbolicType>,
}

impl SymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the constraint of `name`.
    pub fn declare_symbol(&mut self, name: &str, constraint: TypeConstraint) {
        self.entry(name).constraint = Some(constraint);
    }

    /// Record that input position `index` references `symbol`.
    pub fn set_input_symbol(&mut self, index: usize, symbol: &str) {
        let entry = self.entry(symbol);
        if !entry.input_indices.contains(&index) {
            entry.input_indices.push(index);
            entry.input_indices.sort_unstable();
        }
    }

    /// Record that output position `index` references `symbol`.
    pub fn set_output_symbol(&mut self, index: usize, symbol: &str) {
        let entry = self.entry(symbol);
        if !entry.output_indices.contains(&index) {
            entry.output_indices.push(index);
            entry.output_indices.sort_unstable();
        }
    }

    fn entry(&mut self, name: &str) -> &mut SymbolicType {
        self.symbols
            .entry(name.to_string())
            .or_insert_with(|| SymbolicType::new(name))
    }

    pub fn named_symbols(&self) -> &BTreeMap<String, SymbolicType> {
        &self.symbols
    }

    pub fn get(&self, name: &str) -> Option<&SymbolicType> {
        self.symbols.get(name)
    }

    /// Symbols referenced by at least one input, in order of first input position.
    pub fn symbols(&self) -> Vec<&SymbolicType> {
        let mut out = self
            .symbols
            .values()
            .filter(|sym| sym.is_input_bound())
            .collect::<Vec<_>>();
        out.sort_by_key(|sym| sym.input_indices[0]);
        out
    }

    /// Symbols referenced by at least one output, in order of first output position.
    pub fn out_symbols(&self) -> Vec<&SymbolicType> {
        let mut out = self
            .symbols
            .values()
            .filter(|sym| !sym.output_indices.is_empty())
            .collect::<Vec<_>>();
        out.sort_by_key(|sym| sym.output_indices[0]);
        out
    }

    pub fn input_symbol(&self, index: usize) -> Option<&SymbolicType> {
        self.symbols
            .values()
            .find(|sym| sym.input_indices.contains(&index))
    }

    pub fn output_symbol(&self, index: usize) -> Option<&SymbolicType> {
        self.symbols
            .values()
            .find(|sym| sym.output_indices.contains(&index))
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True iff the store is non-empty and every constrained symbol is ordered.
    pub fn is_support_ordered_symbolic_infer_dtype(&self) -> bool {
        let mut constraints = self
            .symbols
            .values()
            .filter_map(|sym| sym.constraint.as_ref())
            .peekable();
        constraints.peek().is_some() && constraints.all(TypeConstraint::is_ordered)
    }

    /// Drop every input binding. Used for start nodes whose inputs are vestigial.
    pub fn clear_input_bindings(&mut self) {
        for sym in self.symbols.values_mut() {
            sym.input_indices.clear();
        }
    }

    /// Number of legal combinations of an ordered store.
    pub fn ordered_len(&self) -> Option<usize> {
        self.symbols
            .values()
            .filter_map(|sym| match &sym.constraint {
                Some(TypeConstraint::Ordered(list)) => Some(list.len()),
                _ => None,
            })
            .next()
    }

    /// Reject stores the inference generator cannot reason about.
    pub fn check(&self, op: &str) -> Result<(), AscIrError> {
        for sym in self.symbols.values() {
            let bound = sym.is_input_bound() || !sym.output_indices.is_empty();
            if bound && sym.constraint.is_none() {
                return Err(AscIrError::UnconstrainedSymbol {
                    op: op.to_string(),
                    symbol: sym.name.clone(),
                });
            }
        }

        let (ordered, unordered): (Vec<_>, Vec<_>) = self
            .symbols
            .values()
            .filter(|sym| sym.constraint.is_some())
            .partition(|sym| sym.constraint.as_ref().is_some_and(TypeConstraint::is_ordered));
        if !ordered.is_empty() && !unordered.is_empty() {
            return Err(AscIrError::MixedSymbolModes {
                op: op.to_string(),
                ordered: ordered.iter().map(|sym| sym.name.clone()).collect(),
                unordered: unordered.iter().map(|sym| sym.name.clone()).collect(),
            });
        }

        if let Some(expected) = self.ordered_len() {
            for sym in &ordered {
                let actual = sym.constraint.as_ref().map(TypeConstraint::len).unwrap_or(0);
                if actual != expected {
                    return Err(AscIrError::OrderedLengthMismatch {
                        op: op.to_string(),
                        symbol: sym.name.clone(),
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
