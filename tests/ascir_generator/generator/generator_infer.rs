use anyhow::Result;

use crate::common::{
    assert_contains, assert_not_contains, generate_builtins, generate_stubs, method_block,
    struct_block,
};

#[test]
fn stub_op8_emits_single_table() -> Result<()> {
    let generated = generate_stubs()?;
    let block = struct_block(&generated.header, "StubOp8")?;
    let infer = method_block(block, "InferDataType")?;
    assert_contains(
        infer,
        r#"
    GE_ASSERT_TRUE(input_dtypes.size() == 1U, "StubOp8 expects 1 input dtypes, got %zu.", input_dtypes.size());
    GE_ASSERT_TRUE(expect_output_dtypes.empty() || expect_output_dtypes.size() == 1U, "StubOp8 expects 0 or 1 output dtypes, got %zu.", expect_output_dtypes.size());
    static const std::map<ge::DataType, std::vector<std::vector<ge::DataType>>> results_0 = {
      {ge::DT_INT32, {{ge::DT_BF16}}},
      {ge::DT_INT64, {{ge::DT_FLOAT}}},
    };
    const auto *results = &results_0;
    const ge::DataType key = input_dtypes[0];
    const auto iter = results->find(key);
    GE_WARN_ASSERT(iter != results->end(), "StubOp8: input dtypes are not supported.");
    const auto &candidates = iter->second;
    if (expect_output_dtypes.empty()) {
      if (candidates.size() > 1U) {
        GELOGW("StubOp8 has multiple results, cannot infer output dtypes.");
        return ge::FAILED;
      }
      expect_output_dtypes = candidates.front();
      return ge::SUCCESS;
    }
    GE_WARN_ASSERT(std::find(candidates.begin(), candidates.end(), expect_output_dtypes) != candidates.end(), "StubOp8: output dtypes are not supported.");
    return ge::SUCCESS;
"#,
    )?;
    assert_not_contains(infer, "rtGetSocVersion")?;
    Ok(())
}

#[test]
fn stub_op8_new_branches_on_soc_version() -> Result<()> {
    let generated = generate_stubs()?;
    let block = struct_block(&generated.header, "StubOp8New")?;
    let infer = method_block(block, "InferDataType")?;
    for index in 0..3 {
        assert_contains(infer, &format!("results_{index} = {{ {{ge::DT_INT32, {{{{ge::DT_BF16}}}}}},"))?;
    }
    assert_contains(
        infer,
        r#"
    char soc_version[128] = {};
    auto res = rtGetSocVersion(soc_version, 128U);
    GE_ASSERT_TRUE(res == RT_ERROR_NONE, "Failed to get soc version str.");
    const std::string soc_str(soc_version);
    const std::map<ge::DataType, std::vector<std::vector<ge::DataType>>> *results = nullptr;
    if (soc_str == "socv1") {
      results = &results_0;
    } else if (soc_str == "socv2") {
      results = &results_1;
    } else if (soc_str == "socv3") {
      results = &results_2;
    } else {
      GELOGW("StubOp8New does not support soc version %s.", soc_str.c_str());
      return ge::FAILED;
    }
    const ge::DataType key = input_dtypes[0];
"#,
    )?;
    Ok(())
}

#[test]
fn unordered_variants_branch_on_soc_version() -> Result<()> {
    let generated = generate_builtins()?;
    let block = struct_block(&generated.header, "MatMul")?;
    let infer = method_block(block, "InferDataType")?;
    assert_contains(
        infer,
        r#"
    const std::string soc_str(soc_version);
    if (soc_str == "Ascend910B") {
      static const std::set<ge::DataType> support_dtypes_of_sym_T = {ge::DT_FLOAT, ge::DT_FLOAT16, ge::DT_BF16};
      GE_WARN_ASSERT(support_dtypes_of_sym_T.count(input_dtypes[0]) > 0U, "MatMul: dtype of symbol T is not supported.");
      if (expect_output_dtypes.empty()) {
        expect_output_dtypes.push_back(input_dtypes[0]);
        return ge::SUCCESS;
      }
      GE_WARN_ASSERT(expect_output_dtypes[0] == input_dtypes[0], "MatMul: output 0 dtype is not supported.");
      return ge::SUCCESS;
    } else if (soc_str == "Ascend310P") {
      static const std::set<ge::DataType> support_dtypes_of_sym_T = {ge::DT_FLOAT16};
"#,
    )?;
    assert_contains(
        infer,
        r#"
    } else if (soc_str == "Ascend950") {
      static const std::set<ge::DataType> support_dtypes_of_sym_T = {ge::DT_FLOAT, ge::DT_FLOAT16, ge::DT_BF16, ge::DT_HIFLOAT8};
"#,
    )?;
    assert_contains(
        infer,
        r#"
    } else {
      GELOGW("MatMul does not support soc version %s.", soc_str.c_str());
      return ge::FAILED;
    }
"#,
    )?;

    let add = method_block(struct_block(&generated.header, "Add")?, "InferDataType")?;
    assert_not_contains(add, "rtGetSocVersion")?;
    Ok(())
}

#[test]
fn stub_op4_checks_symbols_and_refuses_to_guess() -> Result<()> {
    let generated = generate_stubs()?;
    let block = struct_block(&generated.header, "StubOp4")?;
    let infer = method_block(block, "InferDataType")?;
    assert_contains(
        infer,
        r#"
    static const std::set<ge::DataType> support_dtypes_of_sym_T1 = {ge::DT_INT32, ge::DT_INT64};
    static const std::set<ge::DataType> support_dtypes_of_sym_T2 = {ge::DT_FLOAT, ge::DT_FLOAT16};
    static const std::set<ge::DataType> support_dtypes_of_sym_T3 = {ge::DT_DOUBLE, ge::DT_BOOL};
    GE_WARN_ASSERT(support_dtypes_of_sym_T1.count(input_dtypes[0]) > 0U, "StubOp4: dtype of symbol T1 is not supported.");
    GE_WARN_ASSERT(support_dtypes_of_sym_T2.count(input_dtypes[1]) > 0U, "StubOp4: dtype of symbol T2 is not supported.");
    if (expect_output_dtypes.empty()) {
      GELOGW("StubOp4 has multiple results, cannot infer output dtypes.");
      return ge::FAILED;
    }
    GE_WARN_ASSERT(support_dtypes_of_sym_T3.count(expect_output_dtypes[0]) > 0U, "StubOp4: output 0 dtype is not supported.");
    GE_WARN_ASSERT(support_dtypes_of_sym_T3.count(expect_output_dtypes[1]) > 0U, "StubOp4: output 1 dtype is not supported.");
    GE_WARN_ASSERT(expect_output_dtypes[1] == expect_output_dtypes[0], "StubOp4: outputs 0 and 1 of symbol T3 must have the same dtype.");
    GE_WARN_ASSERT(expect_output_dtypes[2] == input_dtypes[1], "StubOp4: output 2 dtype is not supported.");
    return ge::SUCCESS;
"#,
    )?;
    let no_check = method_block(block, "InferDataTypeWithNoCheck")?;
    assert_not_contains(no_check, "support_dtypes_of_sym")?;
    assert_contains(no_check, "expect_output_dtypes.size() == 3U")?;
    Ok(())
}

#[test]
fn shared_inputs_emit_consistency_asserts() -> Result<()> {
    let generated = generate_builtins()?;
    let block = struct_block(&generated.header, "Add")?;
    let infer = method_block(block, "InferDataType")?;
    assert_contains(
        infer,
        r#"GE_WARN_ASSERT(input_dtypes[0] == input_dtypes[1], "Add: inputs 0 and 1 of symbol T must have the same dtype.");"#,
    )?;
    assert_contains(
        infer,
        r#"
    if (expect_output_dtypes.empty()) {
      expect_output_dtypes.push_back(input_dtypes[0]);
      return ge::SUCCESS;
    }
"#,
    )?;
    let no_check = method_block(block, "InferDataTypeWithNoCheck")?;
    assert_contains(
        no_check,
        r#"
    GE_WARN_ASSERT(input_dtypes[0] == input_dtypes[1], "Add: inputs 0 and 1 of symbol T must have the same dtype.");
    return ge::SUCCESS;
"#,
    )?;
    Ok(())
}

#[test]
fn constant_output_symbols_are_pushed_as_literals() -> Result<()> {
    let generated = generate_builtins()?;
    let infer = method_block(struct_block(&generated.header, "Eq")?, "InferDataType")?;
    assert_contains(infer, "expect_output_dtypes.push_back(ge::DT_BOOL);")?;
    assert_contains(
        infer,
        r#"GE_WARN_ASSERT(expect_output_dtypes[0] == ge::DT_BOOL, "Eq: output 0 dtype is not supported.");"#,
    )?;
    Ok(())
}

#[test]
fn policy_ops_emit_inferred_vectors() -> Result<()> {
    let generated = generate_builtins()?;
    let block = struct_block(&generated.header, "SumWithCount")?;
    assert_contains(
        method_block(block, "InferDataType")?,
        r#"
    std::vector<ge::DataType> inferred_dtypes;
    inferred_dtypes.push_back(PromoteDtype(input_dtypes[0]));
    inferred_dtypes.push_back(ge::DT_INT64);
    if (expect_output_dtypes.empty()) {
      expect_output_dtypes = inferred_dtypes;
      return ge::SUCCESS;
    }
    GE_WARN_ASSERT(expect_output_dtypes == inferred_dtypes, "SumWithCount: output dtypes are not consistent with inputs.");
    return ge::SUCCESS;
"#,
    )?;
    assert_contains(
        method_block(block, "InferDataTypeWithNoCheck")?,
        r#"
    (void)input_dtypes;
    (void)expect_output_dtypes;
    GELOGW("SumWithCount does not support infer dtype without check.");
    return ge::FAILED;
"#,
    )?;
    Ok(())
}

#[test]
fn start_nodes_accept_empty_input_lists() -> Result<()> {
    let generated = generate_builtins()?;
    let infer = method_block(struct_block(&generated.header, "Data")?, "InferDataType")?;
    assert_contains(
        infer,
        r#"GE_ASSERT_TRUE(input_dtypes.empty() || input_dtypes.size() == 1U, "Data expects 1 input dtypes, got %zu.", input_dtypes.size());"#,
    )?;
    assert_contains(infer, r#"GELOGW("Data has multiple results, cannot infer output dtypes.");"#)?;
    assert_not_contains(infer, "input_dtypes[0]")?;
    Ok(())
}

#[test]
fn cast_table_lists_every_target() -> Result<()> {
    let generated = generate_builtins()?;
    let infer = method_block(struct_block(&generated.header, "Cast")?, "InferDataType")?;
    assert_contains(
        infer,
        "{ge::DT_BOOL, {{ge::DT_FLOAT}, {ge::DT_INT32}}},",
    )?;
    assert_contains(
        infer,
        "{ge::DT_INT16, {{ge::DT_FLOAT}, {ge::DT_FLOAT16}, {ge::DT_INT32}}},",
    )?;
    Ok(())
}
