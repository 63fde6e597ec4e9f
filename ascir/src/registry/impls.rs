use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::symbols::{SymbolStore, TypeConstraint};

/// Attribute semantics an operator exposes to the performance model.
pub trait IrAttImpl: Send + Sync {
    fn api_perf_name(&self) -> &str;

    fn perf_table_key(&self) -> Option<&str> {
        None
    }
}

/// Code generation hooks the kernel backend queries per operator.
pub trait IrCodegenImpl: Send + Sync {
    fn api_call_name(&self) -> &str;

    fn api_tiling_type_name(&self) -> Option<&str> {
        None
    }

    fn is_vector_function_supported(&self) -> bool {
        false
    }

    fn extra_includes(&self) -> Vec<String> {
        Vec::new()
    }
}

pub type AttFactory = Arc<dyn Fn() -> Box<dyn IrAttImpl> + Send + Sync>;
pub type CodegenFactory = Arc<dyn Fn() -> Box<dyn IrCodegenImpl> + Send + Sync>;

pub fn att_factory<F>(factory: F) -> Option<AttFactory>
where
    F: Fn() -> Box<dyn IrAttImpl> + Send + Sync + 'static,
{
    Some(Arc::new(factory))
}

pub fn codegen_factory<F>(factory: F) -> Option<CodegenFactory>
where
    F: Fn() -> Box<dyn IrCodegenImpl> + Send + Sync + 'static,
{
    Some(Arc::new(factory))
}

/// Stock attribute implementation naming a perf-model API.
#[derive(Debug, Clone)]
pub struct ApiAtt {
    pub perf: &'static str,
    pub table: Option<&'static str>,
}

impl IrAttImpl for ApiAtt {
    fn api_perf_name(&self) -> &str {
        self.perf
    }

    fn perf_table_key(&self) -> Option<&str> {
        self.table
    }
}

/// Stock codegen implementation calling one device API.
#[derive(Debug, Clone)]
pub struct ApiCodegen {
    pub api: &'static str,
    pub tiling: Option<&'static str>,
    pub vector_function: bool,
    pub includes: &'static [&'static str],
}

impl ApiCodegen {
    pub const fn new(api: &'static str) -> Self {
        Self {
            api,
            tiling: None,
            vector_function: false,
            includes: &[],
        }
    }
}

impl IrCodegenImpl for ApiCodegen {
    fn api_call_name(&self) -> &str {
        self.api
    }

    fn api_tiling_type_name(&self) -> Option<&str> {
        self.tiling
    }

    fn is_vector_function_supported(&self) -> bool {
        self.vector_function
    }

    fn extra_includes(&self) -> Vec<String> {
        self.includes.iter().map(|inc| inc.to_string()).collect()
    }
}

/// Legacy implementation triple.
#[derive(Clone, Default)]
pub struct AscIrImpl {
    pub att: Option<AttFactory>,
    pub codegen: Option<CodegenFactory>,
    pub dtypes: Vec<(String, TypeConstraint)>,
}

/// Second-generation implementation triple. Stored in its own map and
/// consulted only after the legacy map.
#[derive(Clone, Default)]
pub struct AscIrImplV2 {
    pub att: Option<AttFactory>,
    pub codegen: Option<CodegenFactory>,
    pub dtypes: Vec<(String, TypeConstraint)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImplGeneration {
    Legacy,
    V2,
}

/// Order in which implementation maps are searched.
pub const IMPL_LOOKUP_ORDER: [ImplGeneration; 2] = [ImplGeneration::Legacy, ImplGeneration::V2];

/// One registered implementation triple and the soc versions sharing it.
#[derive(Clone)]
pub struct HardwareVariant {
    pub generation: ImplGeneration,
    pub soc_versions: Vec<String>,
    pub att: Option<AttFactory>,
    pub codegen: Option<CodegenFactory>,
    /// Per-variant constraint overrides as declared at the `impls` call.
    pub dtypes: Vec<(String, TypeConstraint)>,
    /// Slot bindings and constraints snapshotted when the record was built.
    pub symbols: SymbolStore,
}

impl HardwareVariant {
    pub(crate) fn legacy(soc_versions: Vec<String>, parts: AscIrImpl) -> Self {
        Self {
            generation: ImplGeneration::Legacy,
            soc_versions,
            att: parts.att,
            codegen: parts.codegen,
            dtypes: parts.dtypes,
            symbols: SymbolStore::new(),
        }
    }

    pub(crate) fn v2(soc_versions: Vec<String>, parts: AscIrImplV2) -> Self {
        Self {
            generation: ImplGeneration::V2,
            soc_versions,
            att: parts.att,
            codegen: parts.codegen,
            dtypes: parts.dtypes,
            symbols: SymbolStore::new(),
        }
    }
}

impl fmt::Debug for HardwareVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HardwareVariant")
            .field("generation", &self.generation)
            .field("soc_versions", &self.soc_versions)
            .field("att", &self.att.is_some())
            .field("codegen", &self.codegen.is_some())
            .field("dtypes", &self.dtypes)
            .finish()
    }
}

/// Why an implementation lookup came back empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
    #[error("op type {0} is not registered")]
    UnknownType(String),
    #[error("op type {op} has no implementation for soc version {soc}")]
    UnknownSocVersion { op: String, soc: String },
    #[error("op type {op} registers a null {what} factory for soc version {soc}")]
    NullFactory {
        op: String,
        soc: String,
        what: &'static str,
    },
}
