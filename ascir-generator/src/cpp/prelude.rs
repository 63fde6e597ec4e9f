use std::collections::BTreeMap;

use ascir::DataType;

use crate::settings::GeneratorSettings;

const STD_INCLUDES: &[&str] = &[
    "algorithm", "cstdint", "map", "set", "string", "tuple", "vector",
];

/// Guard, includes, namespace opening and the `PromoteDtype` helper.
pub(crate) fn emit_prelude(settings: &GeneratorSettings, extra_includes: &[String]) -> String {
    let guard = &settings.header_guard;
    let mut out = String::new();
    out.push_str("// @generated by ascir-generator. Do not edit.\n");
    out.push_str(&format!("#ifndef {guard}\n"));
    out.push_str(&format!("#define {guard}\n\n"));
    for include in STD_INCLUDES {
        out.push_str(&format!("#include <{include}>\n"));
    }
    out.push('\n');
    out.push_str(&format!("#include \"{}\"\n", settings.base_include));
    for include in extra_includes {
        out.push_str(&format!("#include \"{include}\"\n"));
    }
    out.push('\n');
    for namespace in &settings.namespaces {
        out.push_str(&format!("namespace {namespace} {{\n"));
    }
    out.push('\n');
    out.push_str(&promote_helper());
    out
}

/// C++ twin of [`DataType::promoted`].
fn promote_helper() -> String {
    let mut widened: BTreeMap<DataType, Vec<DataType>> = BTreeMap::new();
    for dtype in DataType::ALL {
        let target = dtype.promoted();
        if target != dtype {
            widened.entry(target).or_default().push(dtype);
        }
    }
    let mut out = String::new();
    out.push_str("inline ge::DataType PromoteDtype(ge::DataType dtype) {\n");
    out.push_str("  switch (dtype) {\n");
    for (target, sources) in &widened {
        for source in sources {
            out.push_str(&format!("    case {}:\n", source.cpp_literal()));
        }
        out.push_str(&format!("      return {};\n", target.cpp_literal()));
    }
    out.push_str("    default:\n");
    out.push_str("      return dtype;\n");
    out.push_str("  }\n");
    out.push_str("}\n\n");
    out
}

/// Leave the operator namespace and open the free-function one beside it.
pub(crate) fn emit_cg_open(settings: &GeneratorSettings) -> String {
    format!(
        "}}  // namespace {}\n\nnamespace {} {{\n\n",
        settings.op_namespace(),
        settings.cg_namespace
    )
}

/// Close the free-function namespace, the outer namespaces and the guard.
pub(crate) fn emit_epilogue(settings: &GeneratorSettings) -> String {
    let mut out = format!("}}  // namespace {}\n", settings.cg_namespace);
    let outer = &settings.namespaces[..settings.namespaces.len().saturating_sub(1)];
    for namespace in outer.iter().rev() {
        out.push_str(&format!("}}  // namespace {namespace}\n"));
    }
    out.push_str(&format!("\n#endif  // {}\n", settings.header_guard));
    out
}
