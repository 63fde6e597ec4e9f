//! `CommonInferDtype` / `CommonInferDtypeWithNoCheck`: type name -> static method.
use super::render::DTYPE_VEC;

pub(crate) fn emit_dispatch_functions(ops: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&dispatch_function("CommonInferDtype", "InferDataType", ops));
    out.push_str(&dispatch_function(
        "CommonInferDtypeWithNoCheck",
        "InferDataTypeWithNoCheck",
        ops,
    ));
    out
}

fn dispatch_function(name: &str, method: &str, ops: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "inline ge::Status {name}(const std::string &type, const {DTYPE_VEC} &input_dtypes,\n    {DTYPE_VEC} &expect_output_dtypes) {{\n"
    ));
    out.push_str(&format!(
        "  using InferDtypeFunc = ge::Status (*)(const {DTYPE_VEC} &, {DTYPE_VEC} &);\n"
    ));
    out.push_str("  static const std::map<std::string, InferDtypeFunc> infer_dtype_funcs = {\n");
    for op in ops {
        out.push_str(&format!("    {{\"{op}\", &{op}::{method}}},\n"));
    }
    out.push_str("  };\n");
    out.push_str("  const auto iter = infer_dtype_funcs.find(type);\n");
    out.push_str("  if (iter == infer_dtype_funcs.end()) {\n");
    out.push_str("    GELOGW(\"Node type %s is not supported to infer dtype\", type.c_str());\n");
    out.push_str("    return ge::FAILED;\n");
    out.push_str("  }\n");
    out.push_str("  return iter->second(input_dtypes, expect_output_dtypes);\n");
    out.push_str("}\n\n");
    out
}
