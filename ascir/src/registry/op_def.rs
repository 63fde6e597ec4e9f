use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::AscIrError;

use super::attrs::AttrDef;
use super::impls::{HardwareVariant, ImplGeneration, IMPL_LOOKUP_ORDER};
use super::policy::{DtypePolicy, ViewPolicy};
use super::symbols::{SymbolStore, TypeConstraint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlotKind {
    Required,
    Optional,
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpSlot {
    pub name: String,
    pub kind: SlotKind,
    pub symbol: Option<String>,
}

impl OpSlot {
    pub fn new(name: &str, kind: SlotKind, symbol: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            symbol: symbol.map(str::to_string),
        }
    }
}

/// Scheduling category of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ComputeType {
    Data,
    Load,
    Store,
    ReduceStore,
    Elewise,
    Broadcast,
    Reduce,
    Transpose,
    Concat,
    Split,
    Gather,
    Cube,
    #[default]
    Invalid,
}

impl ComputeType {
    pub const fn cpp_name(self) -> &'static str {
        match self {
            ComputeType::Data => "kComputeData",
            ComputeType::Load => "kComputeLoad",
            ComputeType::Store => "kComputeStore",
            ComputeType::ReduceStore => "kComputeReduceStore",
            ComputeType::Elewise => "kComputeElewise",
            ComputeType::Broadcast => "kComputeBroadcast",
            ComputeType::Reduce => "kComputeReduce",
            ComputeType::Transpose => "kComputeTranspose",
            ComputeType::Concat => "kComputeConcat",
            ComputeType::Split => "kComputeSplit",
            ComputeType::Gather => "kComputeGather",
            ComputeType::Cube => "kComputeCube",
            ComputeType::Invalid => "kComputeInvalid",
        }
    }
}

/// Everything known about one operator type.
#[derive(Debug, Clone)]
pub struct OpDef {
    pub type_name: String,
    pub file: String,
    pub line: u32,
    pub inputs: Vec<OpSlot>,
    pub outputs: Vec<OpSlot>,
    pub attrs: Vec<AttrDef>,
    pub compute_type: ComputeType,
    pub start_node: bool,
    /// Record-level bindings and constraints.
    pub symbols: SymbolStore,
    pub view_policies: Vec<ViewPolicy>,
    pub dtype_policies: Vec<DtypePolicy>,
    /// Implementation triples in registration order.
    pub variants: Vec<HardwareVariant>,
    /// soc version -> index into `variants`, one map per impl generation.
    pub impls: BTreeMap<String, usize>,
    pub impls_v2: BTreeMap<String, usize>,
}

impl OpDef {
    pub(crate) fn new(type_name: &str, file: &str, line: u32) -> Self {
        Self {
            type_name: type_name.to_string(),
            file: file.to_string(),
            line,
            inputs: Vec::new(),
            outputs: Vec::new(),
            attrs: Vec::new(),
            compute_type: ComputeType::default(),
            start_node: false,
            symbols: SymbolStore::new(),
            view_policies: Vec::new(),
            dtype_policies: Vec::new(),
            variants: Vec::new(),
            impls: BTreeMap::new(),
            impls_v2: BTreeMap::new(),
        }
    }

    pub fn input_num(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_num(&self) -> usize {
        self.outputs.len()
    }

    pub fn has_dynamic_output(&self) -> bool {
        self.outputs.iter().any(|slot| slot.kind == SlotKind::Dynamic)
    }

    pub fn has_optional_input(&self) -> bool {
        self.inputs.iter().any(|slot| slot.kind == SlotKind::Optional)
    }

    pub fn is_attr_existed(&self, name: &str) -> bool {
        self.attrs.iter().any(|attr| attr.name == name)
    }

    pub fn attr(&self, name: &str) -> Option<&AttrDef> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    /// Number of soc versions with an implementation, over both generations.
    pub fn soc_impl_size(&self) -> usize {
        self.impls.len() + self.impls_v2.len()
    }

    fn impl_map(&self, generation: ImplGeneration) -> &BTreeMap<String, usize> {
        match generation {
            ImplGeneration::Legacy => &self.impls,
            ImplGeneration::V2 => &self.impls_v2,
        }
    }

    fn impl_map_mut(&mut self, generation: ImplGeneration) -> &mut BTreeMap<String, usize> {
        match generation {
            ImplGeneration::Legacy => &mut self.impls,
            ImplGeneration::V2 => &mut self.impls_v2,
        }
    }

    /// Implementation variant for `soc`, legacy map first.
    pub fn variant_for(&self, soc: &str) -> Option<&HardwareVariant> {
        IMPL_LOOKUP_ORDER
            .iter()
            .find_map(|generation| self.impl_map(*generation).get(soc))
            .and_then(|index| self.variants.get(*index))
    }

    /// Every soc version with an implementation, sorted and deduplicated.
    pub fn soc_versions(&self) -> Vec<String> {
        let mut socs = self
            .impls
            .keys()
            .chain(self.impls_v2.keys())
            .cloned()
            .collect::<Vec<_>>();
        socs.sort();
        socs.dedup();
        socs
    }

    /// Stores the inference generator reads: one per variant, or the
    /// record-level store when no variant is registered.
    pub fn symbol_stores(&self) -> Vec<&SymbolStore> {
        if self.variants.is_empty() {
            vec![&self.symbols]
        } else {
            self.variants.iter().map(|variant| &variant.symbols).collect()
        }
    }

    /// Copy of the record-level store with per-variant overrides applied.
    pub(crate) fn snapshot_symbols(
        &self,
        overrides: &[(String, TypeConstraint)],
    ) -> Result<SymbolStore, AscIrError> {
        let mut store = self.symbols.clone();
        for (symbol, constraint) in overrides {
            store.declare_symbol(symbol, constraint.clone());
        }
        store.check(&self.type_name)?;
        Ok(store)
    }

    /// Snapshot this record's bindings into `variant`, then attach it.
    pub(crate) fn attach_variant(&mut self, mut variant: HardwareVariant) -> Result<(), AscIrError> {
        variant.symbols = self.snapshot_symbols(&variant.dtypes)?;
        self.insert_variant(variant);
        Ok(())
    }

    /// Attach a variant as is, skipping soc versions the record already
    /// implements in the same generation.
    fn insert_variant(&mut self, mut variant: HardwareVariant) {
        let generation = variant.generation;
        let (fresh, taken): (Vec<String>, Vec<String>) = variant
            .soc_versions
            .iter()
            .cloned()
            .partition(|soc| !self.impl_map(generation).contains_key(soc));
        for soc in &taken {
            crate::warning!(
                "{}: soc version {} already implemented, keeping the earlier entry",
                self.type_name,
                soc
            );
        }
        if fresh.is_empty() {
            return;
        }
        variant.soc_versions = fresh;
        let index = self.variants.len();
        for soc in &variant.soc_versions {
            self.impl_map_mut(generation).insert(soc.clone(), index);
        }
        self.variants.push(variant);
    }

    /// Union `other`'s implementation variants into this record. Each
    /// variant keeps the bindings it was built with; no other field of this
    /// record changes.
    pub(crate) fn merge(&mut self, other: OpDef) {
        for variant in other.variants {
            self.insert_variant(variant);
        }
    }
}
