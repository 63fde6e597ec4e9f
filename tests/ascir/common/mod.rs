#![allow(dead_code)]

use anyhow::Result;
use ascir::registry::{
    att_factory, codegen_factory, ApiAtt, ApiCodegen, AscIrImpl, AscIrRegistry, IrAttImpl,
    IrCodegenImpl,
};
use ascir::{reg_asc_ir, DataType, InferDispatch, TypeConstraint};

pub const SOCV1: &str = "socv1";
pub const SOCV2: &str = "socv2";
pub const SOCV3: &str = "socv3";

pub fn builtin_registry() -> Result<AscIrRegistry> {
    let mut registry = AscIrRegistry::new();
    ascir::ops::register_builtin_ops(&mut registry)?;
    Ok(registry)
}

pub fn builtin_dispatch() -> Result<InferDispatch> {
    Ok(InferDispatch::from_registry(&builtin_registry()?))
}

pub fn stub_impl(perf: &'static str, api: &'static str) -> AscIrImpl {
    AscIrImpl {
        att: att_factory(move || -> Box<dyn IrAttImpl> { Box::new(ApiAtt { perf, table: None }) }),
        codegen: codegen_factory(move || -> Box<dyn IrCodegenImpl> {
            Box::new(ApiCodegen::new(api))
        }),
        dtypes: Vec::new(),
    }
}

/// Two correlated inputs, three outputs, one of them output-only with two legal dtypes.
pub fn register_stub_op4(registry: &mut AscIrRegistry) -> Result<()> {
    reg_asc_ir!(StubOp4)
        .input("x1", "T1")
        .input("x2", "T2")
        .output("y1", "T3")
        .output("y2", "T3")
        .output("y3", "T2")
        .data_type("T1", TypeConstraint::set([DataType::Int32, DataType::Int64]))
        .data_type("T2", TypeConstraint::set([DataType::Float16, DataType::Float]))
        .data_type("T3", TypeConstraint::set([DataType::Double, DataType::Bool]))
        .impls(&[SOCV1], stub_impl("StubPerf", "StubOp4"))
        .register_into(registry)?;
    Ok(())
}

fn stub_op8_input() -> TypeConstraint {
    TypeConstraint::ordered([DataType::Int32, DataType::Int32, DataType::Int64])
}

fn stub_op8_output() -> TypeConstraint {
    TypeConstraint::ordered([DataType::Bf16, DataType::Bf16, DataType::Float])
}

/// One ordered input symbol, one ordered output symbol, one hardware variant.
pub fn register_stub_op8(registry: &mut AscIrRegistry) -> Result<()> {
    reg_asc_ir!(StubOp8)
        .input("x", "T1")
        .output("y", "T2")
        .data_type("T1", stub_op8_input())
        .data_type("T2", stub_op8_output())
        .impls(&[SOCV1], stub_impl("StubPerf", "StubOp8"))
        .register_into(registry)?;
    Ok(())
}

/// Same tables as StubOp8, registered once per soc version.
pub fn register_stub_op8_new(registry: &mut AscIrRegistry) -> Result<()> {
    let per_soc = || AscIrImpl {
        dtypes: vec![
            ("T1".to_string(), stub_op8_input()),
            ("T2".to_string(), stub_op8_output()),
        ],
        ..stub_impl("StubPerf", "StubOp8New")
    };
    reg_asc_ir!(StubOp8New)
        .input("x", "T1")
        .output("y", "T2")
        .impls(&[SOCV1], per_soc())
        .impls(&[SOCV2], per_soc())
        .impls(&[SOCV3], per_soc())
        .register_into(registry)?;
    Ok(())
}

pub fn stub_registry() -> Result<AscIrRegistry> {
    let mut registry = AscIrRegistry::new();
    register_stub_op4(&mut registry)?;
    register_stub_op8(&mut registry)?;
    register_stub_op8_new(&mut registry)?;
    Ok(registry)
}
