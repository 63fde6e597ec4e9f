//! Small C++ fragments shared by the emitters.
use std::collections::BTreeSet;

use ascir::DataType;

pub(crate) const DTYPE_VEC: &str = "std::vector<ge::DataType>";

pub(crate) fn dtype_list<'a, I>(dtypes: I) -> String
where
    I: IntoIterator<Item = &'a DataType>,
{
    dtypes
        .into_iter()
        .map(|dtype| dtype.cpp_literal())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `{ge::DT_A, ge::DT_B}`
pub(crate) fn dtype_braces<'a, I>(dtypes: I) -> String
where
    I: IntoIterator<Item = &'a DataType>,
{
    format!("{{{}}}", dtype_list(dtypes))
}

pub(crate) fn support_set_name(symbol: &str) -> String {
    format!("support_dtypes_of_sym_{symbol}")
}

pub(crate) fn support_set_decl(symbol: &str, legal: &BTreeSet<DataType>) -> String {
    format!(
        "    static const std::set<ge::DataType> {} = {};\n",
        support_set_name(symbol),
        dtype_braces(legal)
    )
}

/// Map key type: the scalar dtype for one key input, a tuple otherwise.
pub(crate) fn key_type(key_len: usize) -> String {
    if key_len == 1 {
        "ge::DataType".to_string()
    } else {
        format!("std::tuple<{}>", vec!["ge::DataType"; key_len].join(", "))
    }
}

pub(crate) fn key_literal(key: &[DataType]) -> String {
    match key {
        [single] => single.cpp_literal(),
        _ => format!("std::make_tuple({})", dtype_list(key)),
    }
}

/// Key built from the observed input dtypes.
pub(crate) fn key_expr(key_inputs: &[usize]) -> String {
    match key_inputs {
        [single] => format!("input_dtypes[{single}]"),
        _ => {
            let parts = key_inputs
                .iter()
                .map(|index| format!("input_dtypes[{index}]"))
                .collect::<Vec<_>>();
            format!("std::make_tuple({})", parts.join(", "))
        }
    }
}

pub(crate) fn results_type(key_len: usize) -> String {
    format!("std::map<{}, std::vector<{DTYPE_VEC}>>", key_type(key_len))
}

pub(crate) fn uint_literal(value: usize) -> String {
    format!("{value}U")
}
