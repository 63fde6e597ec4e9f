//! `Cast` and its table of legal (from, to) conversions.
use crate::dtype::DataType;
use crate::error::AscIrError;
use crate::reg_asc_ir;
use crate::registry::{AscIrRegistry, AttrKind, ComputeType, TypeConstraint, ViewPolicy};

use super::{api_impl, ASCEND_950, LEGACY_SOCS};

use DataType::{Bf16, Bool, Double, Float, Float16, Int16, Int32, Int64, Int8, Uint8};

/// Every conversion the vector unit supports, grouped by source dtype.
pub const CAST_PAIRS: [(DataType, DataType); 45] = [
    (Float, Float16),
    (Float, Bf16),
    (Float, Int32),
    (Float, Int64),
    (Float, Int16),
    (Float, Int8),
    (Float, Uint8),
    (Float, Bool),
    (Float, Double),
    (Float16, Float),
    (Float16, Bf16),
    (Float16, Int32),
    (Float16, Int64),
    (Float16, Int16),
    (Float16, Int8),
    (Float16, Uint8),
    (Float16, Bool),
    (Bf16, Float),
    (Bf16, Float16),
    (Bf16, Int32),
    (Bf16, Int64),
    (Int32, Float),
    (Int32, Float16),
    (Int32, Bf16),
    (Int32, Int64),
    (Int32, Int16),
    (Int32, Int8),
    (Int32, Uint8),
    (Int32, Bool),
    (Int64, Float),
    (Int64, Float16),
    (Int64, Bf16),
    (Int64, Int32),
    (Int64, Bool),
    (Int16, Float),
    (Int16, Float16),
    (Int16, Int32),
    (Int8, Float),
    (Int8, Float16),
    (Int8, Int32),
    (Uint8, Float),
    (Uint8, Float16),
    (Uint8, Int32),
    (Bool, Float),
    (Bool, Int32),
];

pub(super) fn register(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    let from = CAST_PAIRS.iter().map(|(from, _)| *from);
    let to = CAST_PAIRS.iter().map(|(_, to)| *to);
    let mut socs = LEGACY_SOCS.to_vec();
    socs.push(ASCEND_950);

    reg_asc_ir!(Cast)
        .input("x", "T1")
        .output("y", "T2")
        .attr("dst_type", AttrKind::DataType)
        .data_type("T1", TypeConstraint::ordered(from))
        .data_type("T2", TypeConstraint::ordered(to))
        .compute_type(ComputeType::Elewise)
        .views(vec![ViewPolicy::elewise(0)])
        .impls(&socs, api_impl("CastPerf", "Cast"))
        .register_into(registry)
}
