//! Dtype inference: per-operator plans, their evaluation, and type-name dispatch.
mod dispatch;
mod eval;
mod plan;
mod probe;

pub use dispatch::InferDispatch;
pub use plan::{
    DtypeInferPlan, DtypeStrategy, LegalityTable, OrderedTable, OutputRule, OutputSource,
    SymbolGroup,
};
pub use probe::{ArchProbe, SystemProbe, RT_ERROR_NONE, SOC_VERSION_MAX_LEN};
