//! Selection, layout and matrix operators.
use crate::dtype::DataType;
use crate::error::AscIrError;
use crate::reg_asc_ir;
use crate::registry::{
    AscIrImpl, AscIrImplV2, AscIrRegistry, AttrKind, ComputeType, TypeConstraint, ViewPolicy,
};

use super::{
    api_impl, movable, set_of, vf_impl, ASCEND_310P, ASCEND_910B, ASCEND_950, INDEX_TYPES,
    LEGACY_SOCS, NUMERIC,
};

pub(super) fn register(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    reg_asc_ir!(Where)
        .input("cond", "U")
        .input("x1", "T")
        .input("x2", "T")
        .output("y", "T")
        .data_type("U", TypeConstraint::set([DataType::Bool]))
        .data_type("T", set_of(NUMERIC))
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::Broadcast])
        .impls(LEGACY_SOCS, api_impl("SelectPerf", "Select"))
        .register_into(registry)?;

    reg_asc_ir!(Concat)
        .dynamic_input("x", "T")
        .output("y", "T")
        .attr("concat_dim", AttrKind::Int64)
        .data_type("T", movable())
        .compute_type(ComputeType::Concat)
        .impls(LEGACY_SOCS, api_impl("ConcatPerf", "Concat"))
        .register_into(registry)?;

    // output count is only known once the graph is built
    reg_asc_ir!(Split)
        .input("x", "T")
        .dynamic_output("y", "T")
        .attr("split_dim", AttrKind::Int64)
        .attr("size_splits", AttrKind::ListListInt64)
        .data_type("T", movable())
        .compute_type(ComputeType::Split)
        .impls(LEGACY_SOCS, api_impl("SplitPerf", "Split"))
        .register_into(registry)?;

    reg_asc_ir!(Transpose)
        .input("x", "T")
        .output("y", "T")
        .attr("perm", AttrKind::ListListInt64)
        .data_type("T", movable())
        .compute_type(ComputeType::Transpose)
        .impls(LEGACY_SOCS, api_impl("TransposePerf", "Transpose"))
        .register_into(registry)?;

    reg_asc_ir!(Gather)
        .input("x", "T")
        .input("indices", "U")
        .output("y", "T")
        .attr("axis", AttrKind::Int64)
        .data_type("T", set_of(NUMERIC))
        .data_type("U", set_of(INDEX_TYPES))
        .compute_type(ComputeType::Gather)
        .impls(LEGACY_SOCS, api_impl("GatherPerf", "Gather"))
        .register_into(registry)?;

    register_matmul(registry)
}

/// MatMul dtype support differs per soc, so each variant narrows `T`.
fn register_matmul(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    let cube = |dtypes: &[DataType]| vec![("T".to_string(), set_of(dtypes))];

    reg_asc_ir!(MatMul)
        .input("x1", "T")
        .input("x2", "T")
        .optional_input("bias", "T")
        .output("y", "T")
        .attr("transpose_x1", AttrKind::Int64)
        .attr("transpose_x2", AttrKind::Int64)
        .attr("offset_x", AttrKind::Int64)
        .data_type("T", set_of(&[DataType::Float16]))
        .compute_type(ComputeType::Cube)
        .impls(
            &[ASCEND_910B],
            AscIrImpl {
                dtypes: cube(&[DataType::Float16, DataType::Bf16, DataType::Float]),
                ..api_impl("CubePerf", "Mmad")
            },
        )
        .impls(
            &[ASCEND_310P],
            AscIrImpl {
                dtypes: cube(&[DataType::Float16]),
                ..api_impl("CubePerf", "Mmad")
            },
        )
        .impls_v2(
            &[ASCEND_950],
            AscIrImplV2 {
                dtypes: cube(&[
                    DataType::Float16,
                    DataType::Bf16,
                    DataType::Float,
                    DataType::Hifloat8,
                ]),
                ..vf_impl("CubePerf", "Mmad")
            },
        )
        .register_into(registry)
}
