//! Element-wise math, comparisons and reductions.
use crate::dtype::DataType;
use crate::error::AscIrError;
use crate::reg_asc_ir;
use crate::registry::{
    AscIrRegistry, AttrKind, ComputeType, DtypePolicy, OpDefBuilder, TypeConstraint, ViewPolicy,
};

use super::{api_impl, set_of, union_of, vf_impl, ASCEND_950, FLOATS, INTEGERS, LEGACY_SOCS, NUMERIC};

/// (type, device api, legal dtypes)
type ElewiseEntry = (&'static str, &'static str, &'static [DataType]);

const UNARY: &[ElewiseEntry] = &[
    ("Abs", "Abs", NUMERIC),
    ("Exp", "Exp", FLOATS),
    ("Ln", "Ln", FLOATS),
    ("Sqrt", "Sqrt", FLOATS),
    ("Rsqrt", "Rsqrt", FLOATS),
    ("Neg", "Muls", NUMERIC),
    ("Relu", "Relu", NUMERIC),
    ("Reciprocal", "Reciprocal", FLOATS),
    ("Sigmoid", "Sigmoid", FLOATS),
    ("Tanh", "Tanh", FLOATS),
];

const BINARY: &[ElewiseEntry] = &[
    ("Add", "Add", NUMERIC),
    ("Sub", "Sub", NUMERIC),
    ("Mul", "Mul", NUMERIC),
    ("Div", "Div", FLOATS),
    ("Maximum", "Max", NUMERIC),
    ("Minimum", "Min", NUMERIC),
];

const COMPARE: &[ElewiseEntry] = &[
    ("Eq", "Compare", NUMERIC),
    ("Ne", "Compare", NUMERIC),
    ("Gt", "Compare", NUMERIC),
    ("Ge", "Compare", NUMERIC),
    ("Lt", "Compare", NUMERIC),
    ("Le", "Compare", NUMERIC),
];

const REDUCE: &[ElewiseEntry] = &[
    ("Sum", "ReduceSum", NUMERIC),
    ("Max", "ReduceMax", NUMERIC),
    ("Min", "ReduceMin", NUMERIC),
    ("Mean", "ReduceMean", FLOATS),
    ("Prod", "ReduceProd", NUMERIC),
];

pub(super) fn register(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    for &(type_name, api, dtypes) in UNARY {
        OpDefBuilder::new(type_name, file!(), line!())
            .input("x", "T")
            .output("y", "T")
            .data_type("T", set_of(dtypes))
            .compute_type(ComputeType::Elewise)
            .views(vec![ViewPolicy::elewise(0)])
            .impls(LEGACY_SOCS, api_impl("VectorPerf", api))
            .impls_v2(&[ASCEND_950], vf_impl("VectorPerf", api))
            .register_into(registry)?;
    }

    for &(type_name, api, dtypes) in BINARY {
        OpDefBuilder::new(type_name, file!(), line!())
            .input("x1", "T")
            .input("x2", "T")
            .output("y", "T")
            .data_type("T", set_of(dtypes))
            .compute_type(ComputeType::Elewise)
            .views(vec![ViewPolicy::Broadcast])
            .impls(LEGACY_SOCS, api_impl("VectorPerf", api))
            .impls_v2(&[ASCEND_950], vf_impl("VectorPerf", api))
            .register_into(registry)?;
    }

    for &(type_name, api, dtypes) in COMPARE {
        OpDefBuilder::new(type_name, file!(), line!())
            .input("x1", "T")
            .input("x2", "T")
            .output("y", "U")
            .data_type("T", set_of(dtypes))
            .data_type("U", TypeConstraint::set([DataType::Bool]))
            .compute_type(ComputeType::Elewise)
            .views(vec![ViewPolicy::Broadcast])
            .impls(LEGACY_SOCS, api_impl("ComparePerf", api))
            .register_into(registry)?;
    }

    for &(type_name, api, dtypes) in REDUCE {
        OpDefBuilder::new(type_name, file!(), line!())
            .input("x", "T")
            .output("y", "T")
            .attr("axis", AttrKind::Int64)
            .data_type("T", set_of(dtypes))
            .compute_type(ComputeType::Reduce)
            .views(vec![ViewPolicy::reduce(0, "axis")])
            .impls(LEGACY_SOCS, api_impl("ReducePerf", api))
            .register_into(registry)?;
    }

    register_logical(registry)?;
    register_policy_ops(registry)
}

fn register_logical(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    let bool_like = || union_of(&[&[DataType::Bool], INTEGERS]);

    reg_asc_ir!(LogicalAnd)
        .input("x1", "T")
        .input("x2", "T")
        .output("y", "U")
        .data_type("T", bool_like())
        .data_type("U", TypeConstraint::set([DataType::Bool]))
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::Broadcast])
        .impls(LEGACY_SOCS, api_impl("VectorPerf", "And"))
        .register_into(registry)?;

    reg_asc_ir!(LogicalOr)
        .input("x1", "T")
        .input("x2", "T")
        .output("y", "U")
        .data_type("T", bool_like())
        .data_type("U", TypeConstraint::set([DataType::Bool]))
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::Broadcast])
        .impls(LEGACY_SOCS, api_impl("VectorPerf", "Or"))
        .register_into(registry)?;

    reg_asc_ir!(LogicalNot)
        .input("x", "T")
        .output("y", "U")
        .data_type("T", bool_like())
        .data_type("U", TypeConstraint::set([DataType::Bool]))
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::elewise(0)])
        .impls(LEGACY_SOCS, api_impl("VectorPerf", "Not"))
        .register_into(registry)?;
    Ok(())
}

/// Operators whose output dtypes follow fixed per-output policies.
fn register_policy_ops(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    reg_asc_ir!(Gelu)
        .inputs(&["x"])
        .outputs(&["y"])
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::elewise(0)])
        .data_types(vec![DtypePolicy::SameAsInput(0)])
        .register_into(registry)?;

    reg_asc_ir!(Axpy)
        .inputs(&["x1", "x2"])
        .outputs(&["y"])
        .attr("alpha", AttrKind::Float)
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::Broadcast])
        .data_types(vec![DtypePolicy::Promote(0)])
        .register_into(registry)?;

    reg_asc_ir!(IsFinite)
        .inputs(&["x"])
        .outputs(&["y"])
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::elewise(0)])
        .data_types(vec![DtypePolicy::Fixed(DataType::Bool)])
        .register_into(registry)?;

    reg_asc_ir!(SumWithCount)
        .inputs(&["x"])
        .outputs(&["sum", "count"])
        .attr("axis", AttrKind::Int64)
        .compute_type(ComputeType::Reduce)
        .views(vec![ViewPolicy::reduce(0, "axis"), ViewPolicy::reduce(0, "axis")])
        .data_types(vec![
            DtypePolicy::Promote(0),
            DtypePolicy::Fixed(DataType::Int64),
        ])
        .register_into(registry)?;
    Ok(())
}
