//! Built-in operator registrations.
mod cast;
mod compute;
mod memory;
mod source;
mod structural;

pub use cast::CAST_PAIRS;

use crate::dtype::DataType;
use crate::error::AscIrError;
use crate::registry::{
    att_factory, codegen_factory, ApiAtt, ApiCodegen, AscIrImpl, AscIrImplV2, AscIrRegistry,
    IrAttImpl, IrCodegenImpl, TypeConstraint,
};

pub const ASCEND_910B: &str = "Ascend910B";
pub const ASCEND_310P: &str = "Ascend310P";
pub const ASCEND_950: &str = "Ascend950";

/// Soc versions served by the legacy implementation table.
pub const LEGACY_SOCS: &[&str] = &[ASCEND_910B, ASCEND_310P];

const FLOATS: &[DataType] = &[DataType::Float, DataType::Float16, DataType::Bf16];

const INTEGERS: &[DataType] = &[
    DataType::Int8,
    DataType::Int16,
    DataType::Int32,
    DataType::Int64,
    DataType::Uint8,
];

const NUMERIC: &[DataType] = &[
    DataType::Float,
    DataType::Float16,
    DataType::Bf16,
    DataType::Int8,
    DataType::Int16,
    DataType::Int32,
    DataType::Int64,
    DataType::Uint8,
];

const INDEX_TYPES: &[DataType] = &[DataType::Int32, DataType::Int64];

/// Register every built-in operator into `registry`.
pub fn register_builtin_ops(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    source::register(registry)?;
    memory::register(registry)?;
    compute::register(registry)?;
    cast::register(registry)?;
    structural::register(registry)?;
    Ok(())
}

fn set_of(dtypes: &[DataType]) -> TypeConstraint {
    TypeConstraint::set(dtypes.iter().copied())
}

fn union_of(groups: &[&[DataType]]) -> TypeConstraint {
    TypeConstraint::set(groups.iter().flat_map(|group| group.iter().copied()))
}

fn movable() -> TypeConstraint {
    union_of(&[NUMERIC, &[DataType::Bool, DataType::Double]])
}

fn any_dtype() -> TypeConstraint {
    let dtypes = DataType::ALL
        .iter()
        .copied()
        .filter(|dtype| *dtype != DataType::Undefined);
    TypeConstraint::set(dtypes)
}

fn api_att(perf: &'static str) -> impl Fn() -> Box<dyn IrAttImpl> + Send + Sync + 'static {
    move || -> Box<dyn IrAttImpl> { Box::new(ApiAtt { perf, table: None }) }
}

fn api_codegen(codegen: ApiCodegen) -> impl Fn() -> Box<dyn IrCodegenImpl> + Send + Sync + 'static {
    move || -> Box<dyn IrCodegenImpl> { Box::new(codegen.clone()) }
}

/// Legacy triple calling one device API, dtypes from the record.
fn api_impl(perf: &'static str, api: &'static str) -> AscIrImpl {
    AscIrImpl {
        att: att_factory(api_att(perf)),
        codegen: codegen_factory(api_codegen(ApiCodegen::new(api))),
        dtypes: Vec::new(),
    }
}

/// Second-generation triple using vector functions.
fn vf_impl(perf: &'static str, api: &'static str) -> AscIrImplV2 {
    let codegen = ApiCodegen {
        vector_function: true,
        ..ApiCodegen::new(api)
    };
    AscIrImplV2 {
        att: att_factory(api_att(perf)),
        codegen: codegen_factory(api_codegen(codegen)),
        dtypes: Vec::new(),
    }
}
