//! Data movement between global memory and the unified buffer.
use crate::error::AscIrError;
use crate::registry::{AscIrRegistry, AttrKind, ComputeType, ViewPolicy};
use crate::{reg_asc_ir, try_register_all};

use super::{api_impl, movable, vf_impl, ASCEND_950, LEGACY_SOCS};

pub(super) fn register(registry: &mut AscIrRegistry) -> Result<(), AscIrError> {
    try_register_all!(
        registry,
        [
            reg_asc_ir!(Load)
                .input("x", "T")
                .output("y", "T")
                .attr("offset", AttrKind::Expression)
                .data_type("T", movable())
                .compute_type(ComputeType::Load)
                .views(vec![ViewPolicy::elewise(0)])
                .impls(LEGACY_SOCS, api_impl("LoadPerf", "DataCopy"))
                .impls_v2(&[ASCEND_950], vf_impl("LoadPerf", "DataCopy")),
            reg_asc_ir!(Store)
                .input("x", "T")
                .output("y", "T")
                .attr("offset", AttrKind::Expression)
                .data_type("T", movable())
                .compute_type(ComputeType::Store)
                .views(vec![ViewPolicy::elewise(0)])
                .impls(LEGACY_SOCS, api_impl("StorePerf", "DataCopy"))
                .impls_v2(&[ASCEND_950], vf_impl("StorePerf", "DataCopy")),
            reg_asc_ir!(Broadcast)
                .input("x", "T")
                .output("y", "T")
                .data_type("T", movable())
                .compute_type(ComputeType::Broadcast)
                .views(vec![ViewPolicy::Broadcast])
                .impls(LEGACY_SOCS, api_impl("BroadcastPerf", "Broadcast")),
            reg_asc_ir!(Nop)
                .input("x", "T")
                .output("y", "T")
                .data_type("T", movable())
                .compute_type(ComputeType::Elewise)
                .views(vec![ViewPolicy::elewise(0)]),
        ]
    )
}
