mod attrs;
mod builder;
mod impls;
mod manifest;
mod op_def;
mod policy;
mod store;
mod symbols;

pub use attrs::{AttrDef, AttrKind};
pub use builder::OpDefBuilder;
pub use impls::{
    att_factory, codegen_factory, ApiAtt, ApiCodegen, AscIrImpl, AscIrImplV2, AttFactory,
    CodegenFactory, HardwareVariant, ImplGeneration, IrAttImpl, IrCodegenImpl, LookupMiss,
    IMPL_LOOKUP_ORDER,
};
pub use manifest::{Manifest, ManifestOp, ManifestVariant};
pub use op_def::{ComputeType, OpDef, OpSlot, SlotKind};
pub use policy::{DtypePolicy, ViewPolicy};
pub use store::{registry, registry_mut, AscIrRegistry};
pub use symbols::{SymbolStore, SymbolicType, TypeConstraint};
