//! Graph-building free functions, one per operator.
use ascir::registry::{OpDef, SlotKind};

struct Param {
    decl: String,
    assign: String,
}

pub(crate) fn emit_cg_functions(def: &OpDef, op_namespace: &str) -> String {
    let mut out = cg_function(def, op_namespace, true);
    if def.has_optional_input() && !def.start_node {
        out.push_str(&cg_function(def, op_namespace, false));
    }
    out
}

fn cg_function(def: &OpDef, op_namespace: &str, with_optional: bool) -> String {
    let name = &def.type_name;
    let mut params = Vec::new();
    if !def.start_node {
        for slot in &def.inputs {
            if slot.kind == SlotKind::Optional && !with_optional {
                continue;
            }
            let ty = match slot.kind {
                SlotKind::Dynamic => "const std::vector<AscOpOutput> &",
                _ => "const AscOpOutput &",
            };
            params.push(Param {
                decl: format!("{ty}{}", slot.name),
                assign: format!("op.{0} = {0};", slot.name),
            });
        }
    }
    for attr in &def.attrs {
        let decl = if attr.kind.is_scalar() {
            format!("{} {}", attr.kind.cpp_type(), attr.name)
        } else {
            format!("const {} &{}", attr.kind.cpp_type(), attr.name)
        };
        params.push(Param {
            decl,
            assign: format!("op.ir_attr.{0} = {0};", attr.name),
        });
    }

    let (ret_type, ret_stmt) = match def.outputs.as_slice() {
        [] => ("void".to_string(), None),
        [single] => ("AscOpOutput".to_string(), Some(format!("return op.{};", single.name))),
        outputs => {
            let types = vec!["AscOpOutput"; outputs.len()].join(", ");
            let fields = outputs
                .iter()
                .map(|slot| format!("op.{}", slot.name))
                .collect::<Vec<_>>()
                .join(", ");
            (
                format!("std::tuple<{types}>"),
                Some(format!("return std::make_tuple({fields});")),
            )
        }
    };

    let mut decls = vec!["const char *name".to_string()];
    decls.extend(params.iter().map(|param| param.decl.clone()));
    let mut out = String::new();
    out.push_str(&format!("inline {ret_type} {name}({}) {{\n", decls.join(", ")));
    out.push_str(&format!(
        "  auto &op = CgContext::Current().Create<{op_namespace}::{name}>(name);\n"
    ));
    for param in &params {
        out.push_str(&format!("  {}\n", param.assign));
    }
    if let Some(ret_stmt) = ret_stmt {
        out.push_str(&format!("  {ret_stmt}\n"));
    }
    out.push_str("}\n\n");
    out
}
