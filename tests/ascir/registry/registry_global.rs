use std::sync::Mutex;

use anyhow::Result;
use ascir::{reg_asc_ir, registry, registry_mut, DataType, TypeConstraint};

use crate::common::{stub_impl, SOCV1, SOCV2};

// the process-wide registry is shared by every test in this binary
static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn register_global(socs: &[&str]) -> Result<()> {
    reg_asc_ir!(GlobalOp)
        .input("x", "T")
        .output("y", "T")
        .data_type("T", TypeConstraint::set([DataType::Float16]))
        .impls(socs, stub_impl("GlobalPerf", "Global"))
        .register()?;
    Ok(())
}

#[test]
fn global_registry_register_and_clear() -> Result<()> {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry_mut().clear_all();

    register_global(&[SOCV1])?;
    register_global(&[SOCV2])?;
    assert_eq!(registry().len(), 1);
    assert_eq!(registry().get("GlobalOp").map(|def| def.soc_impl_size()), Some(2));

    registry_mut().clear_all();
    assert!(registry().is_empty());
    assert!(registry().get_ir_att_impl(SOCV1, "GlobalOp").is_err());
    Ok(())
}

#[test]
fn global_registry_holds_builtins() -> Result<()> {
    let _guard = GLOBAL_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry_mut().clear_all();
    ascir::ops::register_builtin_ops(&mut registry_mut())?;
    let expected = crate::common::builtin_registry()?.len();
    assert_eq!(registry().len(), expected);
    assert!(registry().get("Cast").is_some());
    registry_mut().clear_all();
    Ok(())
}
