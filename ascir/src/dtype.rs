use std::fmt;

use serde::Serialize;

/// Device data type understood by the kernel backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DataType {
    #[serde(rename = "DT_FLOAT")]
    Float,
    #[serde(rename = "DT_FLOAT16")]
    Float16,
    #[serde(rename = "DT_BF16")]
    Bf16,
    #[serde(rename = "DT_DOUBLE")]
    Double,
    #[serde(rename = "DT_INT4")]
    Int4,
    #[serde(rename = "DT_INT8")]
    Int8,
    #[serde(rename = "DT_INT16")]
    Int16,
    #[serde(rename = "DT_INT32")]
    Int32,
    #[serde(rename = "DT_INT64")]
    Int64,
    #[serde(rename = "DT_UINT8")]
    Uint8,
    #[serde(rename = "DT_UINT16")]
    Uint16,
    #[serde(rename = "DT_UINT32")]
    Uint32,
    #[serde(rename = "DT_UINT64")]
    Uint64,
    #[serde(rename = "DT_BOOL")]
    Bool,
    #[serde(rename = "DT_COMPLEX64")]
    Complex64,
    #[serde(rename = "DT_FLOAT8_E5M2")]
    Float8E5m2,
    #[serde(rename = "DT_FLOAT8_E4M3FN")]
    Float8E4m3fn,
    #[serde(rename = "DT_HIFLOAT8")]
    Hifloat8,
    #[serde(rename = "DT_UNDEFINED")]
    Undefined,
}

impl DataType {
    pub const ALL: [DataType; 19] = [
        DataType::Float,
        DataType::Float16,
        DataType::Bf16,
        DataType::Double,
        DataType::Int4,
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::Uint8,
        DataType::Uint16,
        DataType::Uint32,
        DataType::Uint64,
        DataType::Bool,
        DataType::Complex64,
        DataType::Float8E5m2,
        DataType::Float8E4m3fn,
        DataType::Hifloat8,
        DataType::Undefined,
    ];

    /// Enumerator name without namespace, e.g. `DT_FLOAT`.
    pub fn ident(self) -> &'static str {
        match self {
            DataType::Float => "DT_FLOAT",
            DataType::Float16 => "DT_FLOAT16",
            DataType::Bf16 => "DT_BF16",
            DataType::Double => "DT_DOUBLE",
            DataType::Int4 => "DT_INT4",
            DataType::Int8 => "DT_INT8",
            DataType::Int16 => "DT_INT16",
            DataType::Int32 => "DT_INT32",
            DataType::Int64 => "DT_INT64",
            DataType::Uint8 => "DT_UINT8",
            DataType::Uint16 => "DT_UINT16",
            DataType::Uint32 => "DT_UINT32",
            DataType::Uint64 => "DT_UINT64",
            DataType::Bool => "DT_BOOL",
            DataType::Complex64 => "DT_COMPLEX64",
            DataType::Float8E5m2 => "DT_FLOAT8_E5M2",
            DataType::Float8E4m3fn => "DT_FLOAT8_E4M3FN",
            DataType::Hifloat8 => "DT_HIFLOAT8",
            DataType::Undefined => "DT_UNDEFINED",
        }
    }

    /// Fully qualified C++ literal, e.g. `ge::DT_FLOAT`.
    pub fn cpp_literal(self) -> String {
        format!("ge::{}", self.ident())
    }

    /// Widening applied by the `Promote` dtype policy. Must stay in sync with
    /// the `PromoteDtype` helper emitted into the generated header.
    pub fn promoted(self) -> Self {
        match self {
            DataType::Float16 | DataType::Bf16 => DataType::Float,
            DataType::Int8 | DataType::Uint8 | DataType::Int16 => DataType::Int32,
            other => other,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}
