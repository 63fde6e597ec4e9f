use serde::Serialize;

/// Closed set of attribute value kinds an AscIR operator may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttrKind {
    String,
    Int64,
    Float,
    Tensor,
    DataType,
    Format,
    ListListInt64,
    Expression,
}

impl AttrKind {
    pub const ALL: [AttrKind; 8] = [
        AttrKind::String,
        AttrKind::Int64,
        AttrKind::Float,
        AttrKind::Tensor,
        AttrKind::DataType,
        AttrKind::Format,
        AttrKind::ListListInt64,
        AttrKind::Expression,
    ];

    /// C++ type of the generated field.
    pub const fn cpp_type(self) -> &'static str {
        match self {
            AttrKind::String => "std::string",
            AttrKind::Int64 => "int64_t",
            AttrKind::Float => "float",
            AttrKind::Tensor => "ge::Tensor",
            AttrKind::DataType => "ge::DataType",
            AttrKind::Format => "ge::Format",
            AttrKind::ListListInt64 => "std::vector<std::vector<int64_t>>",
            AttrKind::Expression => "ge::Expression",
        }
    }

    /// Tag consumed by attribute (de)serialization downstream.
    pub const fn serialization_kind(self) -> &'static str {
        match self {
            AttrKind::String => "Str",
            AttrKind::Int64 => "Int",
            AttrKind::Float => "Float",
            AttrKind::Tensor => "Tensor",
            AttrKind::DataType => "DataType",
            AttrKind::Format => "Format",
            AttrKind::ListListInt64 => "ListListInt",
            AttrKind::Expression => "Expression",
        }
    }

    /// Scalars are passed by value in generated free functions.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            AttrKind::Int64 | AttrKind::Float | AttrKind::DataType | AttrKind::Format
        )
    }

    /// Look a kind up by its C++ type string.
    pub fn from_cpp_type(type_name: &str) -> Option<Self> {
        let normalized = type_name.split_whitespace().collect::<String>();
        AttrKind::ALL.iter().copied().find(|kind| {
            kind.cpp_type().split_whitespace().collect::<String>() == normalized
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrDef {
    pub name: String,
    pub kind: AttrKind,
}

impl AttrDef {
    pub fn new(name: &str, kind: AttrKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}
