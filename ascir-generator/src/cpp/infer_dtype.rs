//! `InferDataType` / `InferDataTypeWithNoCheck` bodies, one emitter per strategy.
use std::collections::BTreeSet;

use ascir::infer::{DtypeInferPlan, DtypeStrategy, LegalityTable, OrderedTable, OutputSource};
use ascir::DtypePolicy;

use crate::settings::GeneratorSettings;

use super::render::{
    dtype_braces, key_expr, key_literal, key_type, results_type, support_set_decl,
    support_set_name, uint_literal, DTYPE_VEC,
};

fn signature(name: &str) -> String {
    format!(
        "  inline static ge::Status {name}(const {DTYPE_VEC} &input_dtypes,\n      {DTYPE_VEC} &expect_output_dtypes) {{\n"
    )
}

pub(crate) fn emit_infer_data_type(plan: &DtypeInferPlan, settings: &GeneratorSettings) -> String {
    let mut out = signature("InferDataType");
    out.push_str(&arity_asserts(plan));
    out.push_str(&group_asserts(plan));
    match &plan.strategy {
        DtypeStrategy::Uniqueness(tables) => match tables.as_slice() {
            [only] if only.soc_versions.is_empty() => out.push_str(&uniqueness_body(plan, only)),
            _ => out.push_str(&per_soc_uniqueness(plan, tables, settings)),
        },
        DtypeStrategy::Ordered { key_inputs, table } => {
            out.push_str(&table_decl(0, key_inputs.len(), table));
            out.push_str("    const auto *results = &results_0;\n");
            out.push_str(&lookup_tail(plan, key_inputs));
        }
        DtypeStrategy::PerSocOrdered { key_inputs, tables } => {
            for (index, table) in tables.iter().enumerate() {
                out.push_str(&table_decl(index, key_inputs.len(), table));
            }
            out.push_str(&soc_branches(plan, key_inputs.len(), tables, settings));
            out.push_str(&lookup_tail(plan, key_inputs));
        }
        DtypeStrategy::Policy(policies) => out.push_str(&policy_body(plan, policies)),
    }
    out.push_str("  }\n");
    out
}

pub(crate) fn emit_infer_data_type_with_no_check(plan: &DtypeInferPlan) -> String {
    let mut out = signature("InferDataTypeWithNoCheck");
    if plan.strategy.supports_no_check() {
        out.push_str(&arity_asserts(plan));
        out.push_str(&group_asserts(plan));
        out.push_str("    return ge::SUCCESS;\n");
    } else {
        out.push_str("    (void)input_dtypes;\n");
        out.push_str("    (void)expect_output_dtypes;\n");
        out.push_str(&format!(
            "    GELOGW(\"{} does not support infer dtype without check.\");\n",
            plan.op
        ));
        out.push_str("    return ge::FAILED;\n");
    }
    out.push_str("  }\n");
    out
}

fn arity_asserts(plan: &DtypeInferPlan) -> String {
    let inputs = uint_literal(plan.input_num);
    let outputs = uint_literal(plan.output_num);
    let input_cond = if plan.start_node {
        format!("input_dtypes.empty() || input_dtypes.size() == {inputs}")
    } else {
        format!("input_dtypes.size() == {inputs}")
    };
    let mut out = String::new();
    out.push_str(&format!(
        "    GE_ASSERT_TRUE({input_cond}, \"{} expects {} input dtypes, got %zu.\", input_dtypes.size());\n",
        plan.op, plan.input_num
    ));
    out.push_str(&format!(
        "    GE_ASSERT_TRUE(expect_output_dtypes.empty() || expect_output_dtypes.size() == {outputs}, \"{} expects 0 or {} output dtypes, got %zu.\", expect_output_dtypes.size());\n",
        plan.op, plan.output_num
    ));
    out
}

/// Inputs sharing a symbol must carry one dtype.
fn group_asserts(plan: &DtypeInferPlan) -> String {
    let mut out = String::new();
    for group in &plan.groups {
        let Some((first, rest)) = group.inputs.split_first() else {
            continue;
        };
        for other in rest {
            out.push_str(&format!(
                "    GE_WARN_ASSERT(input_dtypes[{first}] == input_dtypes[{other}], \"{}: inputs {first} and {other} of symbol {} must have the same dtype.\");\n",
                plan.op, group.symbol
            ));
        }
    }
    out
}

fn ambiguity_failure(op: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "      GELOGW(\"{op} has multiple results, cannot infer output dtypes.\");\n"
    ));
    out.push_str("      return ge::FAILED;\n");
    out
}

fn uniqueness_body(plan: &DtypeInferPlan, table: &LegalityTable) -> String {
    let rules = &table.outputs;
    let mut out = String::new();
    let mut declared = BTreeSet::new();
    for (group, legal) in plan.groups.iter().zip(&table.legal) {
        if declared.insert(group.symbol.as_str()) {
            out.push_str(&support_set_decl(&group.symbol, legal));
        }
    }
    for rule in rules {
        if let OutputSource::Ambiguous(legal) = &rule.source {
            if declared.insert(rule.symbol.as_str()) {
                out.push_str(&support_set_decl(&rule.symbol, legal));
            }
        }
    }
    for group in &plan.groups {
        let first = group.inputs[0];
        let check = format!(
            "{}.count(input_dtypes[{first}]) > 0U",
            support_set_name(&group.symbol)
        );
        out.push_str(&format!(
            "    GE_WARN_ASSERT({check}, \"{}: dtype of symbol {} is not supported.\");\n",
            plan.op, group.symbol
        ));
    }

    out.push_str("    if (expect_output_dtypes.empty()) {\n");
    let ambiguous = rules
        .iter()
        .any(|rule| matches!(rule.source, OutputSource::Ambiguous(_)));
    if ambiguous {
        out.push_str(&ambiguity_failure(&plan.op));
    } else {
        for rule in rules {
            let value = match &rule.source {
                OutputSource::Input(index) => format!("input_dtypes[{index}]"),
                OutputSource::Const(dtype) => dtype.cpp_literal(),
                OutputSource::Ambiguous(_) => continue,
            };
            out.push_str(&format!("      expect_output_dtypes.push_back({value});\n"));
        }
        out.push_str("      return ge::SUCCESS;\n");
    }
    out.push_str("    }\n");

    for (index, rule) in rules.iter().enumerate() {
        let check = match &rule.source {
            OutputSource::Input(input) => format!("expect_output_dtypes[{index}] == input_dtypes[{input}]"),
            OutputSource::Const(dtype) => {
                format!("expect_output_dtypes[{index}] == {}", dtype.cpp_literal())
            }
            OutputSource::Ambiguous(_) => format!(
                "{}.count(expect_output_dtypes[{index}]) > 0U",
                support_set_name(&rule.symbol)
            ),
        };
        out.push_str(&format!(
            "    GE_WARN_ASSERT({check}, \"{}: output {index} dtype is not supported.\");\n",
            plan.op
        ));
        let earlier = rules[..index]
            .iter()
            .position(|other| other.symbol == rule.symbol);
        if let Some(earlier) = earlier {
            out.push_str(&format!(
                "    GE_WARN_ASSERT(expect_output_dtypes[{index}] == expect_output_dtypes[{earlier}], \"{}: outputs {earlier} and {index} of symbol {} must have the same dtype.\");\n",
                plan.op, rule.symbol
            ));
        }
    }
    out.push_str("    return ge::SUCCESS;\n");
    out
}

fn table_decl(index: usize, key_len: usize, table: &OrderedTable) -> String {
    let mut out = format!(
        "    static const {} results_{index} = {{\n",
        results_type(key_len)
    );
    for (key, candidates) in &table.rows {
        let candidates = candidates
            .iter()
            .map(|row| dtype_braces(row))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("      {{{}, {{{candidates}}}}},\n", key_literal(key)));
    }
    out.push_str("    };\n");
    out
}

/// Every branch body is nested one level deeper than the plain body.
fn per_soc_uniqueness(
    plan: &DtypeInferPlan,
    tables: &[LegalityTable],
    settings: &GeneratorSettings,
) -> String {
    let mut out = soc_probe(settings);
    let branches = tables
        .iter()
        .map(|table| {
            let body = uniqueness_body(plan, table)
                .lines()
                .map(|line| format!("  {line}\n"))
                .collect::<String>();
            (table.soc_versions.as_slice(), body)
        })
        .collect::<Vec<_>>();
    out.push_str(&soc_chain(plan, &branches));
    out
}

fn soc_branches(
    plan: &DtypeInferPlan,
    key_len: usize,
    tables: &[OrderedTable],
    settings: &GeneratorSettings,
) -> String {
    let mut out = soc_probe(settings);
    out.push_str(&format!(
        "    const {} *results = nullptr;\n",
        results_type(key_len)
    ));
    let branches = tables
        .iter()
        .enumerate()
        .map(|(index, table)| {
            (
                table.soc_versions.as_slice(),
                format!("      results = &results_{index};\n"),
            )
        })
        .collect::<Vec<_>>();
    out.push_str(&soc_chain(plan, &branches));
    out
}

fn soc_probe(settings: &GeneratorSettings) -> String {
    let buffer_len = settings.soc_version_buffer_len;
    let mut out = String::new();
    out.push_str(&format!("    char soc_version[{buffer_len}] = {{}};\n"));
    out.push_str(&format!(
        "    auto res = rtGetSocVersion(soc_version, {});\n",
        uint_literal(buffer_len)
    ));
    out.push_str("    GE_ASSERT_TRUE(res == RT_ERROR_NONE, \"Failed to get soc version str.\");\n");
    out.push_str("    const std::string soc_str(soc_version);\n");
    out
}

/// if / else-if over soc groups; an unknown soc fails before any lookup.
fn soc_chain(plan: &DtypeInferPlan, branches: &[(&[String], String)]) -> String {
    let mut out = String::new();
    for (index, (socs, body)) in branches.iter().enumerate() {
        let cond = socs
            .iter()
            .map(|soc| format!("soc_str == \"{soc}\""))
            .collect::<Vec<_>>()
            .join(" || ");
        let keyword = if index == 0 { "if" } else { "} else if" };
        out.push_str(&format!("    {keyword} ({cond}) {{\n"));
        out.push_str(body);
    }
    let unsupported = format!(
        "GELOGW(\"{} does not support soc version %s.\", soc_str.c_str());",
        plan.op
    );
    if branches.is_empty() {
        out.push_str(&format!("    {unsupported}\n"));
        out.push_str("    return ge::FAILED;\n");
    } else {
        out.push_str("    } else {\n");
        out.push_str(&format!("      {unsupported}\n"));
        out.push_str("      return ge::FAILED;\n");
        out.push_str("    }\n");
    }
    out
}

fn lookup_tail(plan: &DtypeInferPlan, key_inputs: &[usize]) -> String {
    let mut out = String::new();
    out.push_str(&format!("    const {} key = {};\n", key_type(key_inputs.len()), key_expr(key_inputs)));
    out.push_str("    const auto iter = results->find(key);\n");
    out.push_str(&format!(
        "    GE_WARN_ASSERT(iter != results->end(), \"{}: input dtypes are not supported.\");\n",
        plan.op
    ));
    out.push_str("    const auto &candidates = iter->second;\n");
    out.push_str("    if (expect_output_dtypes.empty()) {\n");
    out.push_str("      if (candidates.size() > 1U) {\n");
    out.push_str(&format!(
        "        GELOGW(\"{} has multiple results, cannot infer output dtypes.\");\n",
        plan.op
    ));
    out.push_str("        return ge::FAILED;\n");
    out.push_str("      }\n");
    out.push_str("      expect_output_dtypes = candidates.front();\n");
    out.push_str("      return ge::SUCCESS;\n");
    out.push_str("    }\n");
    out.push_str(&format!(
        "    GE_WARN_ASSERT(std::find(candidates.begin(), candidates.end(), expect_output_dtypes) != candidates.end(), \"{}: output dtypes are not supported.\");\n",
        plan.op
    ));
    out.push_str("    return ge::SUCCESS;\n");
    out
}

fn policy_body(plan: &DtypeInferPlan, policies: &[DtypePolicy]) -> String {
    let mut out = format!("    {DTYPE_VEC} inferred_dtypes;\n");
    for policy in policies {
        let value = match policy {
            DtypePolicy::SameAsInput(index) => format!("input_dtypes[{index}]"),
            DtypePolicy::Promote(index) => format!("PromoteDtype(input_dtypes[{index}])"),
            DtypePolicy::Fixed(dtype) => dtype.cpp_literal(),
        };
        out.push_str(&format!("    inferred_dtypes.push_back({value});\n"));
    }
    out.push_str("    if (expect_output_dtypes.empty()) {\n");
    out.push_str("      expect_output_dtypes = inferred_dtypes;\n");
    out.push_str("      return ge::SUCCESS;\n");
    out.push_str("    }\n");
    out.push_str(&format!(
        "    GE_WARN_ASSERT(expect_output_dtypes == inferred_dtypes, \"{}: output dtypes are not consistent with inputs.\");\n",
        plan.op
    ));
    out.push_str("    return ge::SUCCESS;\n");
    out
}
