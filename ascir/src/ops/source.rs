//! Graph source and sink nodes.
use crate::dtype::DataType;
use crate::error::AscIrError;
use crate::reg_asc_ir;
use crate::registry::{AscIrRegistry, AttrKind, ComputeType, TypeConstraint};

use super::{any_dtype, api_impl, INDEX_TYPES, LEGACY_SOCS};

pub(super) fn register(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    reg_asc_ir!(Data)
        .input("x", "T")
        .output("y", "T")
        .attr("index", AttrKind::Int64)
        .attr("format", AttrKind::Format)
        .data_type("T", any_dtype())
        .compute_type(ComputeType::Data)
        .start_node()
        .register_into(registry)?;

    reg_asc_ir!(Scalar)
        .output("y", "T")
        .attr("value", AttrKind::String)
        .data_type("T", any_dtype())
        .compute_type(ComputeType::Data)
        .start_node()
        .register_into(registry)?;

    reg_asc_ir!(IndexExpr)
        .output("y", "T")
        .attr("expr", AttrKind::Expression)
        .data_type("T", TypeConstraint::set(INDEX_TYPES.iter().copied()))
        .compute_type(ComputeType::Data)
        .start_node()
        .register_into(registry)?;

    reg_asc_ir!(Workspace)
        .input("x", "T")
        .output("y", "T")
        .attr("size", AttrKind::Expression)
        .data_type("T", any_dtype())
        .compute_type(ComputeType::Data)
        .start_node()
        .register_into(registry)?;

    reg_asc_ir!(Output)
        .input("x", "T")
        .output("y", "T")
        .attr("index", AttrKind::Int64)
        .data_type("T", any_dtype())
        .compute_type(ComputeType::Data)
        .impls(LEGACY_SOCS, api_impl("OutputPerf", "DataCopyPad"))
        .register_into(registry)?;

    // placeholder tensor carrying a constant payload
    reg_asc_ir!(Const)
        .output("y", "T")
        .attr("value", AttrKind::Tensor)
        .data_type("T", TypeConstraint::set([DataType::Float, DataType::Float16, DataType::Int32]))
        .compute_type(ComputeType::Data)
        .start_node()
        .register_into(registry)?;
    Ok(())
}
