use thiserror::Error;

use crate::dtype::DataType;

/// Problems detected when a registration is finalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AscIrError {
    #[error("{op}: attribute {attr} declares unsupported type {type_name:?}")]
    UnsupportedAttrType {
        op: String,
        attr: String,
        type_name: String,
    },
    #[error("{op}: symbols {ordered:?} are ordered while {unordered:?} are unordered")]
    MixedSymbolModes {
        op: String,
        ordered: Vec<String>,
        unordered: Vec<String>,
    },
    #[error("{op}: symbol {symbol} is bound to a slot but has no dtype constraint")]
    UnconstrainedSymbol { op: String, symbol: String },
    #[error("{op}: ordered symbol {symbol} lists {actual} dtypes, expected {expected}")]
    OrderedLengthMismatch {
        op: String,
        symbol: String,
        expected: usize,
        actual: usize,
    },
    #[error("{op}: dtype policies cannot be combined with symbol constraints ({symbols:?})")]
    ConflictingDtypeMechanisms { op: String, symbols: Vec<String> },
    #[error("{op}: {kind} policy list has {actual} entries for {expected} outputs")]
    PolicyCountMismatch {
        op: String,
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{op}: policy references input {index} but only {inputs} inputs exist")]
    PolicyInputOutOfRange {
        op: String,
        index: usize,
        inputs: usize,
    },
    #[error("{op}: start node dtype policy reads input {index}, start nodes may see no inputs")]
    StartNodePolicyInput { op: String, index: usize },
    #[error("{op}: reduce view policy references unknown attribute {attr}")]
    UnknownPolicyAttr { op: String, attr: String },
}

/// Failures of dtype inference and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    #[error("{op}: expected {expected} input dtypes, got {actual}")]
    InputArity {
        op: String,
        expected: usize,
        actual: usize,
    },
    #[error("{op}: expected 0 or {expected} output dtypes, got {actual}")]
    OutputArity {
        op: String,
        expected: usize,
        actual: usize,
    },
    #[error("{op}: inputs of symbol {symbol} carry different dtypes {dtypes:?}")]
    SymbolMismatch {
        op: String,
        symbol: String,
        dtypes: Vec<DataType>,
    },
    #[error("{op}: dtype {dtype} of symbol {symbol} is not supported")]
    UnsupportedDtype {
        op: String,
        symbol: String,
        dtype: DataType,
    },
    #[error("{op}: input dtypes {inputs:?} are not supported")]
    UnsupportedInputs { op: String, inputs: Vec<DataType> },
    #[error("{op} has multiple results, cannot infer output dtypes")]
    Ambiguous { op: String },
    #[error("{op}: output dtypes {outputs:?} do not match input dtypes {inputs:?}")]
    OutputMismatch {
        op: String,
        inputs: Vec<DataType>,
        outputs: Vec<DataType>,
    },
    #[error("{op}: soc version {soc} is not supported")]
    UnknownSocVersion { op: String, soc: String },
    #[error("failed to get soc version str, result code {code}")]
    ArchProbe { code: i32 },
    #[error("node type {0} is not supported to infer dtype")]
    UnknownType(String),
    #[error("{op}: infer dtype without check is not supported")]
    NoCheckUnsupported { op: String },
}

impl InferError {
    /// Arity errors mean the caller broke the calling convention rather than
    /// supplying unsupported dtypes.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            InferError::InputArity { .. } | InferError::OutputArity { .. }
        )
    }
}
