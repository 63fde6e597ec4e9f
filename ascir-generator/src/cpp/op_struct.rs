//! One `struct` per operator: constants, attribute block, slot fields,
//! constructors and the inference entry points.
use ascir::infer::DtypeInferPlan;
use ascir::registry::{OpDef, SlotKind, ViewPolicy};

use crate::settings::GeneratorSettings;

use super::infer_dtype::{emit_infer_data_type, emit_infer_data_type_with_no_check};
use super::render::uint_literal;

pub(crate) fn emit_op_struct(def: &OpDef, plan: &DtypeInferPlan, settings: &GeneratorSettings) -> String {
    let name = &def.type_name;
    let mut out = String::new();
    out.push_str(&format!("struct {name} : public AscIrOpBase {{\n"));
    out.push_str(&format!("  static constexpr const char *Type = \"{name}\";\n"));
    out.push_str(&format!(
        "  static constexpr ComputeType kComputeType = {};\n",
        def.compute_type.cpp_name()
    ));
    out.push_str(&format!(
        "  static constexpr uint32_t kInputNum = {};\n",
        uint_literal(def.input_num())
    ));
    out.push_str(&format!(
        "  static constexpr uint32_t kOutputNum = {};\n",
        uint_literal(def.output_num())
    ));
    out.push_str(&format!(
        "  static constexpr bool kIsStartNode = {};\n",
        def.start_node
    ));

    out.push_str("  struct IrAttr {\n");
    for attr in &def.attrs {
        out.push_str(&format!("    {} {}{{}};\n", attr.kind.cpp_type(), attr.name));
    }
    out.push_str("  };\n");
    out.push_str("  IrAttr ir_attr;\n");
    if !def.attrs.is_empty() {
        let meta = def
            .attrs
            .iter()
            .map(|attr| format!("{{\"{}\", \"{}\"}}", attr.name, attr.kind.serialization_kind()))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("  static constexpr AscIrAttrMeta kAttrMeta[] = {{{meta}}};\n"));
    }

    for (index, slot) in def.inputs.iter().enumerate() {
        let field = match slot.kind {
            SlotKind::Required => "AscOpInput",
            SlotKind::Optional => "AscOpOptionalInput",
            SlotKind::Dynamic => "AscOpDynamicInput",
        };
        out.push_str(&format!("  {field}<{index}> {};\n", slot.name));
    }
    for (index, slot) in def.outputs.iter().enumerate() {
        out.push_str(&format!("  AscOpOutput<{index}> {};\n", slot.name));
    }

    out.push_str(&constructors(def));
    out.push_str(&emit_infer_data_type(plan, settings));
    out.push_str(&emit_infer_data_type_with_no_check(plan));
    if !def.view_policies.is_empty() {
        out.push_str(&infer_view(&def.view_policies));
    }
    out.push_str("};\n\n");
    out
}

fn constructors(def: &OpDef) -> String {
    let name = &def.type_name;
    let mut init = vec!["AscIrOpBase(name, Type)".to_string()];
    init.extend(
        def.inputs
            .iter()
            .chain(def.outputs.iter())
            .map(|slot| format!("{}(this)", slot.name)),
    );
    let mut out = String::new();
    out.push_str(&format!(
        "  inline explicit {name}(const char *name) : {} {{}}\n",
        init.join(", ")
    ));
    out.push_str(&format!(
        "  inline {name}(const char *name, AscGraph &graph) : {name}(name) {{\n"
    ));
    out.push_str("    graph.AddNode(*this);\n");
    out.push_str("  }\n");
    out
}

fn infer_view(policies: &[ViewPolicy]) -> String {
    let mut out = String::new();
    out.push_str("  inline static ge::Status InferView(const IrAttr &ir_attr,\n");
    out.push_str("      const std::vector<AscTensorView> &input_views,\n");
    out.push_str("      std::vector<AscTensorView> &output_views) {\n");
    let uses_attr = policies
        .iter()
        .any(|policy| matches!(policy, ViewPolicy::Reduce { .. }));
    if !uses_attr {
        out.push_str("    (void)ir_attr;\n");
    }
    out.push_str(&format!(
        "    output_views.resize({});\n",
        uint_literal(policies.len())
    ));
    for (index, policy) in policies.iter().enumerate() {
        match policy {
            ViewPolicy::Elewise { input } => {
                out.push_str(&format!("    output_views[{index}] = input_views[{input}];\n"));
            }
            ViewPolicy::Reduce { input, axis_attr } => {
                out.push_str(&format!(
                    "    GE_ASSERT_SUCCESS(ReduceView(input_views[{input}], ir_attr.{axis_attr}, output_views[{index}]));\n"
                ));
            }
            ViewPolicy::Broadcast => {
                out.push_str(&format!(
                    "    GE_ASSERT_SUCCESS(BroadcastView(input_views, output_views[{index}]));\n"
                ));
            }
        }
    }
    out.push_str("    return ge::SUCCESS;\n");
    out.push_str("  }\n");
    out
}
