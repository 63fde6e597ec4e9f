//! JSON summary of the registry for downstream tooling.
use anyhow::{anyhow, Result};
use serde::Serialize;

use super::attrs::AttrDef;
use super::impls::{HardwareVariant, ImplGeneration};
use super::op_def::{ComputeType, OpDef, OpSlot};
use super::policy::{DtypePolicy, ViewPolicy};
use super::store::AscIrRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub ops: Vec<ManifestOp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestOp {
    #[serde(rename = "type")]
    pub type_name: String,
    pub file: String,
    pub line: u32,
    pub compute_type: ComputeType,
    pub start_node: bool,
    pub inputs: Vec<OpSlot>,
    pub outputs: Vec<OpSlot>,
    pub attrs: Vec<AttrDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ViewPolicy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_types: Vec<DtypePolicy>,
    pub soc_versions: Vec<String>,
    pub soc_versions_v2: Vec<String>,
    pub variants: Vec<ManifestVariant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestVariant {
    pub generation: ImplGeneration,
    pub soc_versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_perf_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_call_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_tiling_type_name: Option<String>,
}

impl ManifestVariant {
    fn from_variant(variant: &HardwareVariant) -> Self {
        let att = variant.att.as_ref().map(|factory| factory());
        let codegen = variant.codegen.as_ref().map(|factory| factory());
        Self {
            generation: variant.generation,
            soc_versions: variant.soc_versions.clone(),
            api_perf_name: att.as_ref().map(|att| att.api_perf_name().to_string()),
            api_call_name: codegen.as_ref().map(|cg| cg.api_call_name().to_string()),
            api_tiling_type_name: codegen
                .as_ref()
                .and_then(|cg| cg.api_tiling_type_name().map(str::to_string)),
        }
    }
}

impl ManifestOp {
    fn from_def(def: &OpDef) -> Self {
        Self {
            type_name: def.type_name.clone(),
            file: def.file.clone(),
            line: def.line,
            compute_type: def.compute_type,
            start_node: def.start_node,
            inputs: def.inputs.clone(),
            outputs: def.outputs.clone(),
            attrs: def.attrs.clone(),
            views: def.view_policies.clone(),
            data_types: def.dtype_policies.clone(),
            soc_versions: def.impls.keys().cloned().collect(),
            soc_versions_v2: def.impls_v2.keys().cloned().collect(),
            variants: def.variants.iter().map(ManifestVariant::from_variant).collect(),
        }
    }
}

impl Manifest {
    /// Every registered operator in generation order.
    pub fn from_registry(registry: &AscIrRegistry) -> Self {
        Self {
            ops: registry
                .sorted_defs()
                .into_iter()
                .map(ManifestOp::from_def)
                .collect(),
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&ManifestOp> {
        self.ops.iter().find(|op| op.type_name == type_name)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| anyhow!("failed to serialize manifest: {err}"))
    }
}
