//! Dtype inference plans.
//!
//! A plan is compiled once per operator from its definition record. The
//! strategy is chosen up front; both the in-process evaluator and the C++
//! emitter only ever walk a finished plan.
use std::collections::BTreeSet;

use anyhow::{anyhow, Result};

use crate::dtype::DataType;
use crate::registry::{DtypePolicy, HardwareVariant, OpDef, SymbolStore, TypeConstraint};

/// Inputs that reference one symbol and must carry the same dtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGroup {
    pub symbol: String,
    pub inputs: Vec<usize>,
}

/// One lookup table: input-symbol dtypes -> candidate output dtype lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedTable {
    /// Soc versions selecting this table. Empty for single-table plans.
    pub soc_versions: Vec<String>,
    /// Rows in first-seen key order; candidates deduplicated in first-seen order.
    pub rows: Vec<(Vec<DataType>, Vec<Vec<DataType>>)>,
}

impl OrderedTable {
    pub fn candidates(&self, key: &[DataType]) -> Option<&[Vec<DataType>]> {
        self.rows
            .iter()
            .find(|(row_key, _)| row_key.as_slice() == key)
            .map(|(_, candidates)| candidates.as_slice())
    }

    fn insert(&mut self, key: Vec<DataType>, outputs: Vec<DataType>) {
        match self.rows.iter_mut().find(|(row_key, _)| *row_key == key) {
            Some((_, candidates)) => {
                if !candidates.contains(&outputs) {
                    candidates.push(outputs);
                }
            }
            None => self.rows.push((key, vec![outputs])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSource {
    /// Symbol also bound to this input position.
    Input(usize),
    /// Output-only symbol with a single legal dtype.
    Const(DataType),
    /// Output-only symbol with several legal dtypes.
    Ambiguous(BTreeSet<DataType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRule {
    pub symbol: String,
    pub source: OutputSource,
}

/// Legal input dtypes and output rules of the uniqueness strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalityTable {
    /// Soc versions selecting this table. Empty when every variant agrees.
    pub soc_versions: Vec<String>,
    /// Legal dtypes of each input group, in `DtypeInferPlan::groups` order.
    pub legal: Vec<BTreeSet<DataType>>,
    pub outputs: Vec<OutputRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DtypeStrategy {
    /// Ordered stores, one table per hardware variant, picked by the soc probe.
    PerSocOrdered {
        key_inputs: Vec<usize>,
        tables: Vec<OrderedTable>,
    },
    /// Ordered store, one table.
    Ordered {
        key_inputs: Vec<usize>,
        table: OrderedTable,
    },
    /// Per-output dtype policies.
    Policy(Vec<DtypePolicy>),
    /// Per-symbol uniqueness and range checks. One table when the legality
    /// is the same on every soc, otherwise one per soc group.
    Uniqueness(Vec<LegalityTable>),
}

impl DtypeStrategy {
    /// Short tag used in logs and reports.
    pub fn tag(&self) -> &'static str {
        match self {
            DtypeStrategy::PerSocOrdered { .. } => "per-soc-ordered",
            DtypeStrategy::Ordered { .. } => "ordered",
            DtypeStrategy::Policy(_) => "policy",
            DtypeStrategy::Uniqueness(_) => "uniqueness",
        }
    }

    /// Only the uniqueness strategy has a meaningful no-check variant.
    pub fn supports_no_check(&self) -> bool {
        matches!(self, DtypeStrategy::Uniqueness(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtypeInferPlan {
    pub op: String,
    pub input_num: usize,
    pub output_num: usize,
    pub start_node: bool,
    pub groups: Vec<SymbolGroup>,
    pub strategy: DtypeStrategy,
}

impl DtypeInferPlan {
    pub fn compile(def: &OpDef) -> Result<Self> {
        if def.has_dynamic_output() {
            return Err(anyhow!(
                "{} has a dynamic output, dtype inference cannot be generated",
                def.type_name
            ));
        }
        let groups = symbol_groups(&def.symbols);
        let strategy = if !def.dtype_policies.is_empty() {
            DtypeStrategy::Policy(def.dtype_policies.clone())
        } else if def
            .symbol_stores()
            .iter()
            .all(|store| store.is_support_ordered_symbolic_infer_dtype())
        {
            compile_ordered(def)?
        } else {
            DtypeStrategy::Uniqueness(compile_uniqueness(def, &groups)?)
        };
        crate::trace!("{}: dtype inference via {}", def.type_name, strategy.tag());
        Ok(Self {
            op: def.type_name.clone(),
            input_num: def.input_num(),
            output_num: def.output_num(),
            start_node: def.start_node,
            groups,
            strategy,
        })
    }
}

fn legal_set(store: &SymbolStore, symbol: &str) -> BTreeSet<DataType> {
    store
        .get(symbol)
        .and_then(|sym| sym.constraint.as_ref())
        .map(TypeConstraint::legal_set)
        .unwrap_or_default()
}

fn symbol_groups(bindings: &SymbolStore) -> Vec<SymbolGroup> {
    bindings
        .symbols()
        .into_iter()
        .map(|sym| SymbolGroup {
            symbol: sym.name.clone(),
            inputs: sym.input_indices.clone(),
        })
        .collect()
}

/// Each variant with the soc versions that actually resolve to it.
fn selected_variants(def: &OpDef) -> Vec<(&HardwareVariant, Vec<String>)> {
    def.variants
        .iter()
        .filter_map(|variant| {
            let socs = variant
                .soc_versions
                .iter()
                .filter(|soc| {
                    def.variant_for(soc)
                        .is_some_and(|selected| std::ptr::eq(selected, variant))
                })
                .cloned()
                .collect::<Vec<_>>();
            (!socs.is_empty()).then_some((variant, socs))
        })
        .collect()
}

fn output_symbols(def: &OpDef) -> Result<Vec<String>> {
    (0..def.output_num())
        .map(|index| {
            def.symbols
                .output_symbol(index)
                .map(|sym| sym.name.clone())
                .ok_or_else(|| {
                    anyhow!(
                        "{}: output {} has no dtype symbol",
                        def.type_name,
                        def.outputs[index].name
                    )
                })
        })
        .collect()
}

fn output_rules(def: &OpDef, store: &SymbolStore, out_symbols: &[String]) -> Vec<OutputRule> {
    out_symbols
        .iter()
        .map(|symbol| {
            let bound_input = def
                .symbols
                .get(symbol)
                .and_then(|sym| sym.input_indices.first().copied());
            let source = match bound_input {
                Some(index) => OutputSource::Input(index),
                None => {
                    let legal = legal_set(store, symbol);
                    match legal.first().copied() {
                        Some(dtype) if legal.len() == 1 => OutputSource::Const(dtype),
                        _ => OutputSource::Ambiguous(legal),
                    }
                }
            };
            OutputRule {
                symbol: symbol.clone(),
                source,
            }
        })
        .collect()
}

fn compile_uniqueness(def: &OpDef, groups: &[SymbolGroup]) -> Result<Vec<LegalityTable>> {
    let out_symbols = output_symbols(def)?;
    let table = |store: &SymbolStore, soc_versions: Vec<String>| LegalityTable {
        soc_versions,
        legal: groups
            .iter()
            .map(|group| legal_set(store, &group.symbol))
            .collect(),
        outputs: output_rules(def, store, &out_symbols),
    };
    let mut tables = selected_variants(def)
        .into_iter()
        .map(|(variant, socs)| table(&variant.symbols, socs))
        .collect::<Vec<_>>();
    let uniform = tables
        .windows(2)
        .all(|pair| pair[0].legal == pair[1].legal && pair[0].outputs == pair[1].outputs);
    if tables.is_empty() || uniform {
        let store = def
            .variants
            .first()
            .map(|variant| &variant.symbols)
            .unwrap_or(&def.symbols);
        tables = vec![table(store, Vec::new())];
    }
    Ok(tables)
}

fn ordered_list<'a>(store: &'a SymbolStore, op: &str, symbol: &str) -> Result<&'a [DataType]> {
    match store.get(symbol).and_then(|sym| sym.constraint.as_ref()) {
        Some(TypeConstraint::Ordered(list)) => Ok(list.as_slice()),
        _ => Err(anyhow!("{op}: symbol {symbol} has no ordered dtype list")),
    }
}

fn ordered_table(
    store: &SymbolStore,
    op: &str,
    key_symbols: &[String],
    out_symbols: &[String],
    soc_versions: Vec<String>,
) -> Result<OrderedTable> {
    let pick = |symbol: &String, row: usize| -> Result<DataType> {
        ordered_list(store, op, symbol)?
            .get(row)
            .copied()
            .ok_or_else(|| anyhow!("{op}: symbol {symbol} has no entry {row}"))
    };
    let mut table = OrderedTable {
        soc_versions,
        rows: Vec::new(),
    };
    for row in 0..store.ordered_len().unwrap_or(0) {
        let key = key_symbols
            .iter()
            .map(|symbol| pick(symbol, row))
            .collect::<Result<Vec<_>>>()?;
        let outputs = out_symbols
            .iter()
            .map(|symbol| pick(symbol, row))
            .collect::<Result<Vec<_>>>()?;
        table.insert(key, outputs);
    }
    Ok(table)
}

fn compile_ordered(def: &OpDef) -> Result<DtypeStrategy> {
    let key_bindings = def.symbols.symbols();
    let key_inputs = key_bindings
        .iter()
        .map(|sym| sym.input_indices[0])
        .collect::<Vec<_>>();
    let key_symbols = key_bindings
        .iter()
        .map(|sym| sym.name.clone())
        .collect::<Vec<_>>();
    let out_symbols = output_symbols(def)?;

    if def.variants.len() <= 1 {
        let store = def
            .variants
            .first()
            .map(|variant| &variant.symbols)
            .unwrap_or(&def.symbols);
        let table = ordered_table(store, &def.type_name, &key_symbols, &out_symbols, Vec::new())?;
        return Ok(DtypeStrategy::Ordered { key_inputs, table });
    }

    let tables = selected_variants(def)
        .into_iter()
        .map(|(variant, socs)| {
            ordered_table(&variant.symbols, &def.type_name, &key_symbols, &out_symbols, socs)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DtypeStrategy::PerSocOrdered { key_inputs, tables })
}
