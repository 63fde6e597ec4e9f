//! Fluent registration of operator definitions.
//!
//! The builder collects declarations in any order and only resolves them in
//! [`OpDefBuilder::build`], where slot bindings and constraints are
//! snapshotted into every hardware variant at once.
use crate::error::AscIrError;

use super::attrs::{AttrDef, AttrKind};
use super::impls::{AscIrImpl, AscIrImplV2, HardwareVariant};
use super::op_def::{ComputeType, OpDef, OpSlot, SlotKind};
use super::policy::{DtypePolicy, ViewPolicy};
use super::store::{registry_mut, AscIrRegistry};
use super::symbols::TypeConstraint;

pub struct OpDefBuilder {
    def: OpDef,
    data_types: Vec<(String, TypeConstraint)>,
    pending: Vec<HardwareVariant>,
    errors: Vec<AscIrError>,
}

impl OpDefBuilder {
    pub fn new(type_name: &str, file: &str, line: u32) -> Self {
        Self {
            def: OpDef::new(type_name, file, line),
            data_types: Vec::new(),
            pending: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push_input(mut self, name: &str, kind: SlotKind, symbol: Option<&str>) -> Self {
        self.def.inputs.push(OpSlot::new(name, kind, symbol));
        self
    }

    fn push_output(mut self, name: &str, kind: SlotKind, symbol: Option<&str>) -> Self {
        self.def.outputs.push(OpSlot::new(name, kind, symbol));
        self
    }

    pub fn input(self, name: &str, symbol: &str) -> Self {
        self.push_input(name, SlotKind::Required, Some(symbol))
    }

    pub fn dynamic_input(self, name: &str, symbol: &str) -> Self {
        self.push_input(name, SlotKind::Dynamic, Some(symbol))
    }

    pub fn optional_input(self, name: &str, symbol: &str) -> Self {
        self.push_input(name, SlotKind::Optional, Some(symbol))
    }

    /// Required inputs without symbols, for policy-driven operators.
    pub fn inputs(self, names: &[&str]) -> Self {
        names
            .iter()
            .fold(self, |builder, name| builder.push_input(name, SlotKind::Required, None))
    }

    pub fn output(self, name: &str, symbol: &str) -> Self {
        self.push_output(name, SlotKind::Required, Some(symbol))
    }

    pub fn dynamic_output(self, name: &str, symbol: &str) -> Self {
        self.push_output(name, SlotKind::Dynamic, Some(symbol))
    }

    pub fn outputs(self, names: &[&str]) -> Self {
        names
            .iter()
            .fold(self, |builder, name| builder.push_output(name, SlotKind::Required, None))
    }

    /// Declare an attribute. Re-declaring an existing name is a no-op.
    pub fn attr(mut self, name: &str, kind: AttrKind) -> Self {
        if !self.def.is_attr_existed(name) {
            self.def.attrs.push(AttrDef::new(name, kind));
        }
        self
    }

    /// Declare an attribute by its C++ type string. Types outside
    /// [`AttrKind`] fail the registration when it is built.
    pub fn attr_typed(self, name: &str, cpp_type: &str) -> Self {
        match AttrKind::from_cpp_type(cpp_type) {
            Some(kind) => self.attr(name, kind),
            None => {
                let mut builder = self;
                builder.errors.push(AscIrError::UnsupportedAttrType {
                    op: builder.def.type_name.clone(),
                    attr: name.to_string(),
                    type_name: cpp_type.to_string(),
                });
                builder
            }
        }
    }

    pub fn data_type(mut self, symbol: &str, constraint: TypeConstraint) -> Self {
        self.data_types.push((symbol.to_string(), constraint));
        self
    }

    pub fn compute_type(mut self, compute_type: ComputeType) -> Self {
        self.def.compute_type = compute_type;
        self
    }

    pub fn start_node(mut self) -> Self {
        self.def.start_node = true;
        self
    }

    pub fn impls(mut self, soc_versions: &[&str], parts: AscIrImpl) -> Self {
        let socs = soc_versions.iter().map(|soc| soc.to_string()).collect();
        self.pending.push(HardwareVariant::legacy(socs, parts));
        self
    }

    pub fn impls_v2(mut self, soc_versions: &[&str], parts: AscIrImplV2) -> Self {
        let socs = soc_versions.iter().map(|soc| soc.to_string()).collect();
        self.pending.push(HardwareVariant::v2(socs, parts));
        self
    }

    pub fn views(mut self, policies: Vec<ViewPolicy>) -> Self {
        self.def.view_policies = policies;
        self
    }

    pub fn data_types(mut self, policies: Vec<DtypePolicy>) -> Self {
        self.def.dtype_policies = policies;
        self
    }

    pub fn build(self) -> Result<OpDef, AscIrError> {
        let OpDefBuilder {
            mut def,
            data_types,
            pending,
            errors,
        } = self;
        if let Some(err) = errors.into_iter().next() {
            return Err(err);
        }

        for (index, slot) in def.inputs.iter().enumerate() {
            if let Some(symbol) = &slot.symbol {
                def.symbols.set_input_symbol(index, symbol);
            }
        }
        for (index, slot) in def.outputs.iter().enumerate() {
            if let Some(symbol) = &slot.symbol {
                def.symbols.set_output_symbol(index, symbol);
            }
        }
        for (symbol, constraint) in data_types {
            def.symbols.declare_symbol(&symbol, constraint);
        }
        if def.start_node {
            def.symbols.clear_input_bindings();
        }

        check_dtype_policies(&def, &pending)?;
        check_view_policies(&def)?;
        if pending.is_empty() && def.dtype_policies.is_empty() {
            def.symbols.check(&def.type_name)?;
        }
        for variant in pending {
            def.attach_variant(variant)?;
        }
        Ok(def)
    }

    pub fn register_into(self, registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
        let def = self.build()?;
        let type_name = def.type_name.clone();
        registry.register_asc_ir(&type_name, def)
    }

    /// Build and register into the process-wide registry.
    pub fn register(self) -> Result<(), AscIrError> {
        self.register_into(&mut registry_mut())
    }
}

fn check_dtype_policies(def: &OpDef, pending: &[HardwareVariant]) -> Result<(), AscIrError> {
    if def.dtype_policies.is_empty() {
        return Ok(());
    }
    let mut constrained = def
        .symbols
        .named_symbols()
        .values()
        .filter(|sym| sym.constraint.is_some())
        .map(|sym| sym.name.clone())
        .collect::<Vec<_>>();
    for variant in pending {
        constrained.extend(variant.dtypes.iter().map(|(symbol, _)| symbol.clone()));
    }
    if !constrained.is_empty() {
        constrained.sort();
        constrained.dedup();
        return Err(AscIrError::ConflictingDtypeMechanisms {
            op: def.type_name.clone(),
            symbols: constrained,
        });
    }
    if def.dtype_policies.len() != def.output_num() {
        return Err(AscIrError::PolicyCountMismatch {
            op: def.type_name.clone(),
            kind: "dtype",
            expected: def.output_num(),
            actual: def.dtype_policies.len(),
        });
    }
    for policy in &def.dtype_policies {
        // start nodes may be inferred from an empty input list
        if let (true, Some(index)) = (def.start_node, policy.input_index()) {
            return Err(AscIrError::StartNodePolicyInput {
                op: def.type_name.clone(),
                index,
            });
        }
        check_policy_input(def, policy.input_index())?;
    }
    Ok(())
}

fn check_view_policies(def: &OpDef) -> Result<(), AscIrError> {
    if def.view_policies.is_empty() {
        return Ok(());
    }
    if def.view_policies.len() != def.output_num() {
        return Err(AscIrError::PolicyCountMismatch {
            op: def.type_name.clone(),
            kind: "view",
            expected: def.output_num(),
            actual: def.view_policies.len(),
        });
    }
    for policy in &def.view_policies {
        check_policy_input(def, policy.input_index())?;
        if let ViewPolicy::Reduce { axis_attr, .. } = policy {
            if !def.is_attr_existed(axis_attr) {
                return Err(AscIrError::UnknownPolicyAttr {
                    op: def.type_name.clone(),
                    attr: axis_attr.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_policy_input(def: &OpDef, index: Option<usize>) -> Result<(), AscIrError> {
    match index {
        Some(index) if index >= def.input_num() => Err(AscIrError::PolicyInputOutOfRange {
            op: def.type_name.clone(),
            index,
            inputs: def.input_num(),
        }),
        _ => Ok(()),
    }
}
