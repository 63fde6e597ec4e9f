use anyhow::Result;
use ascir::registry::{
    AscIrImpl, AscIrImplV2, AscIrRegistry, IrAttImpl, IrCodegenImpl, LookupMiss,
};
use ascir::{reg_asc_ir, DataType, TypeConstraint};

use crate::common::{stub_impl, SOCV1, SOCV2, SOCV3};

fn lookup_registry() -> Result<AscIrRegistry> {
    let legacy = stub_impl("LegacyPerf", "LegacyApi");
    let v2 = AscIrImplV2 {
        att: legacy.att.clone(),
        codegen: stub_impl("V2Perf", "V2Api").codegen,
        dtypes: Vec::new(),
    };
    let mut registry = AscIrRegistry::new();
    reg_asc_ir!(Lookup)
        .input("x", "T")
        .output("y", "T")
        .data_type("T", TypeConstraint::set([DataType::Float]))
        .impls(&[SOCV1], legacy)
        .impls_v2(&[SOCV1, SOCV2], v2)
        .impls(&[SOCV3], AscIrImpl::default())
        .register_into(&mut registry)?;
    Ok(registry)
}

fn att_name(att: Box<dyn IrAttImpl>) -> String {
    att.api_perf_name().to_string()
}

fn codegen_name(codegen: Box<dyn IrCodegenImpl>) -> String {
    codegen.api_call_name().to_string()
}

#[test]
fn legacy_map_is_consulted_first() -> Result<()> {
    let registry = lookup_registry()?;
    assert_eq!(codegen_name(registry.get_ir_codegen_impl(SOCV1, "Lookup")?), "LegacyApi");
    assert_eq!(codegen_name(registry.get_ir_codegen_impl(SOCV2, "Lookup")?), "V2Api");
    assert_eq!(att_name(registry.get_ir_att_impl(SOCV2, "Lookup")?), "LegacyPerf");
    Ok(())
}

#[test]
fn every_lookup_builds_a_fresh_instance() -> Result<()> {
    let registry = lookup_registry()?;
    let first = registry.get_ir_att_impl(SOCV1, "Lookup")?;
    let second = registry.get_ir_att_impl(SOCV1, "Lookup")?;
    assert_eq!(first.api_perf_name(), second.api_perf_name());
    assert!(first.perf_table_key().is_none());
    Ok(())
}

#[test]
fn misses_are_reported_not_raised() -> Result<()> {
    let registry = lookup_registry()?;
    assert_eq!(
        registry.get_ir_att_impl(SOCV1, "Missing").err(),
        Some(LookupMiss::UnknownType("Missing".to_string()))
    );
    assert_eq!(
        registry.get_ir_codegen_impl("socv9", "Lookup").err(),
        Some(LookupMiss::UnknownSocVersion {
            op: "Lookup".to_string(),
            soc: "socv9".to_string(),
        })
    );
    assert_eq!(
        registry.get_ir_att_impl(SOCV3, "Lookup").err(),
        Some(LookupMiss::NullFactory {
            op: "Lookup".to_string(),
            soc: SOCV3.to_string(),
            what: "att",
        })
    );
    assert!(matches!(
        registry.get_ir_codegen_impl(SOCV3, "Lookup").err(),
        Some(LookupMiss::NullFactory { what: "codegen", .. })
    ));
    Ok(())
}

#[test]
fn builtin_ops_resolve_per_soc() -> Result<()> {
    let registry = crate::common::builtin_registry()?;
    let legacy = registry.get_ir_codegen_impl(ascir::ops::ASCEND_910B, "Abs")?;
    assert!(!legacy.is_vector_function_supported());
    let v2 = registry.get_ir_codegen_impl(ascir::ops::ASCEND_950, "Abs")?;
    assert!(v2.is_vector_function_supported());
    assert_eq!(v2.api_call_name(), "Abs");
    assert!(registry.get_ir_codegen_impl(ascir::ops::ASCEND_950, "Nop").is_err());
    Ok(())
}
