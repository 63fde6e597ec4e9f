use std::collections::BTreeMap;

use crate::dtype::DataType;
use crate::error::InferError;
use crate::registry::AscIrRegistry;

use super::plan::DtypeInferPlan;
use super::probe::ArchProbe;

/// Operator type -> compiled dtype inference plan.
#[derive(Debug, Clone, Default)]
pub struct InferDispatch {
    plans: BTreeMap<String, DtypeInferPlan>,
}

impl InferDispatch {
    /// Compile a plan for every operator the generator would emit.
    /// Operators whose plan cannot be built are left out and logged.
    pub fn from_registry(registry: &AscIrRegistry) -> Self {
        let mut plans = BTreeMap::new();
        for def in registry.sorted_defs() {
            if def.has_dynamic_output() {
                crate::trace!("{}: dynamic output, no dtype inference", def.type_name);
                continue;
            }
            match DtypeInferPlan::compile(def) {
                Ok(plan) => {
                    plans.insert(def.type_name.clone(), plan);
                }
                Err(err) => crate::error!("skipping {}: {err}", def.type_name),
            }
        }
        Self { plans }
    }

    pub fn plan(&self, type_name: &str) -> Option<&DtypeInferPlan> {
        self.plans.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.plans.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    fn find(&self, type_name: &str) -> Result<&DtypeInferPlan, InferError> {
        self.plans.get(type_name).ok_or_else(|| {
            crate::warning!("Node type {type_name} is not supported to infer dtype");
            InferError::UnknownType(type_name.to_string())
        })
    }

    /// Route to the operator's inference. Unknown types fail, never panic.
    pub fn infer_dtype<P: ArchProbe + ?Sized>(
        &self,
        type_name: &str,
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
        probe: &P,
    ) -> Result<(), InferError> {
        self.find(type_name)?.infer(inputs, outputs, probe)
    }

    pub fn infer_dtype_with_no_check(
        &self,
        type_name: &str,
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
    ) -> Result<(), InferError> {
        self.find(type_name)?.infer_with_no_check(inputs, outputs)
    }
}
