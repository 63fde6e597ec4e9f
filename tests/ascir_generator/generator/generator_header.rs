use anyhow::Result;
use ascir::registry::{codegen_factory, ApiCodegen, AscIrImpl, AscIrRegistry, IrCodegenImpl};
use ascir::{reg_asc_ir, DataType, TypeConstraint};
use ascir_generator::{generate, GeneratorSettings, SkippedOp};

use crate::common::{
    assert_contains, assert_not_contains, generate_builtins, generate_stubs, struct_block,
};
use crate::stubs::{builtin_registry, SOCV1};

#[test]
fn header_is_framed_by_guard_and_namespaces() -> Result<()> {
    let generated = generate_stubs()?;
    let header = &generated.header;
    assert!(header.starts_with("// @generated by ascir-generator. Do not edit.\n#ifndef ASCIR_OPS_H_\n#define ASCIR_OPS_H_\n"));
    assert!(header.ends_with("}  // namespace cg\n}  // namespace ge\n\n#endif  // ASCIR_OPS_H_\n"));
    assert_contains(
        header,
        r#"
#include <algorithm>
#include <cstdint>
#include <map>
#include <set>
#include <string>
#include <tuple>
#include <vector>

#include "ascir_op_base.h"

namespace ge {
namespace ascir_op {
"#,
    )?;
    assert_contains(header, "}  // namespace ascir_op\n\nnamespace cg {")?;
    Ok(())
}

#[test]
fn promote_helper_matches_policy_widening() -> Result<()> {
    let generated = generate_stubs()?;
    assert_contains(
        &generated.header,
        r#"
inline ge::DataType PromoteDtype(ge::DataType dtype) {
  switch (dtype) {
    case ge::DT_FLOAT16:
    case ge::DT_BF16:
      return ge::DT_FLOAT;
    case ge::DT_INT8:
    case ge::DT_INT16:
    case ge::DT_UINT8:
      return ge::DT_INT32;
    default:
      return dtype;
  }
}
"#,
    )?;
    Ok(())
}

#[test]
fn ops_are_emitted_in_registration_order() -> Result<()> {
    let generated = generate_stubs()?;
    assert_eq!(generated.emitted, vec!["StubOp4", "StubOp8", "StubOp8New"]);
    assert!(generated.skipped.is_empty());
    let positions = generated
        .emitted
        .iter()
        .map(|name| generated.header.find(&format!("struct {name} : public")))
        .collect::<Vec<_>>();
    assert!(positions.iter().all(Option::is_some));
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}

#[test]
fn dispatch_functions_cover_every_emitted_op() -> Result<()> {
    let generated = generate_stubs()?;
    assert_contains(
        &generated.header,
        r#"
inline ge::Status CommonInferDtype(const std::string &type, const std::vector<ge::DataType> &input_dtypes,
    std::vector<ge::DataType> &expect_output_dtypes) {
  using InferDtypeFunc = ge::Status (*)(const std::vector<ge::DataType> &, std::vector<ge::DataType> &);
  static const std::map<std::string, InferDtypeFunc> infer_dtype_funcs = {
    {"StubOp4", &StubOp4::InferDataType},
    {"StubOp8", &StubOp8::InferDataType},
    {"StubOp8New", &StubOp8New::InferDataType},
  };
  const auto iter = infer_dtype_funcs.find(type);
  if (iter == infer_dtype_funcs.end()) {
    GELOGW("Node type %s is not supported to infer dtype", type.c_str());
    return ge::FAILED;
  }
  return iter->second(input_dtypes, expect_output_dtypes);
}
"#,
    )?;
    assert_contains(&generated.header, r#"{"StubOp8New", &StubOp8New::InferDataTypeWithNoCheck},"#)?;
    Ok(())
}

#[test]
fn dynamic_output_ops_are_skipped() -> Result<()> {
    let registry = builtin_registry()?;
    let generated = generate_builtins()?;
    assert_eq!(
        generated.skipped,
        vec![SkippedOp {
            type_name: "Split".to_string(),
            reason: "dynamic output".to_string(),
        }]
    );
    assert_eq!(generated.emitted.len(), registry.len() - 1);
    assert!(struct_block(&generated.header, "Split").is_err());
    assert_not_contains(&generated.header, r#"{"Split","#)?;
    assert_not_contains(&generated.header, "inline AscOpOutput Split(")?;
    Ok(())
}

#[test]
fn ops_without_output_symbols_are_skipped() -> Result<()> {
    let mut registry = AscIrRegistry::new();
    reg_asc_ir!(Bare)
        .inputs(&["x"])
        .outputs(&["y"])
        .register_into(&mut registry)?;
    reg_asc_ir!(Fine)
        .input("x", "T")
        .output("y", "T")
        .data_type("T", TypeConstraint::set([DataType::Float]))
        .register_into(&mut registry)?;
    let generated = generate(&registry, &GeneratorSettings::default())?;
    assert_eq!(generated.emitted, vec!["Fine"]);
    assert_eq!(generated.skipped.len(), 1);
    assert_eq!(generated.skipped[0].type_name, "Bare");
    assert!(generated.skipped[0].reason.contains("has no dtype symbol"));
    Ok(())
}

#[test]
fn codegen_includes_land_in_the_prelude() -> Result<()> {
    let mut registry = AscIrRegistry::new();
    let codegen = ApiCodegen {
        includes: &["kernel/vec_ops.h", "kernel/cube_ops.h"],
        ..ApiCodegen::new("VecOp")
    };
    reg_asc_ir!(WithIncludes)
        .input("x", "T")
        .output("y", "T")
        .data_type("T", TypeConstraint::set([DataType::Float]))
        .impls(
            &[SOCV1],
            AscIrImpl {
                codegen: codegen_factory(move || -> Box<dyn IrCodegenImpl> {
                    Box::new(codegen.clone())
                }),
                ..AscIrImpl::default()
            },
        )
        .register_into(&mut registry)?;
    let generated = generate(&registry, &GeneratorSettings::default())?;
    assert_contains(
        &generated.header,
        "#include \"ascir_op_base.h\"\n#include \"kernel/cube_ops.h\"\n#include \"kernel/vec_ops.h\"",
    )?;
    Ok(())
}

#[test]
fn generation_is_deterministic() -> Result<()> {
    let first = generate_builtins()?;
    let second = generate_builtins()?;
    assert_eq!(first.header, second.header);
    assert_eq!(first.emitted, second.emitted);
    Ok(())
}

#[test]
fn empty_registry_still_yields_a_header() -> Result<()> {
    let generated = generate(&AscIrRegistry::new(), &GeneratorSettings::default())?;
    assert!(generated.emitted.is_empty());
    assert_contains(&generated.header, "static const std::map<std::string, InferDtypeFunc> infer_dtype_funcs = { };")?;
    assert_contains(&generated.header, "#endif  // ASCIR_OPS_H_")?;
    Ok(())
}
