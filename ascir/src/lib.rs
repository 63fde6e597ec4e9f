pub mod logging;

mod dtype;
mod error;
mod macros;

pub mod infer;
pub mod ops;
pub mod registry;

pub use dtype::DataType;
pub use error::{AscIrError, InferError};
pub use infer::{ArchProbe, DtypeInferPlan, DtypeStrategy, InferDispatch, SystemProbe};
pub use registry::{
    registry, registry_mut, AscIrRegistry, AttrKind, ComputeType, DtypePolicy, OpDef,
    OpDefBuilder, TypeConstraint, ViewPolicy,
};
