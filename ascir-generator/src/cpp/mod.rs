//! C++ header emission.
//!
//! Every operator is first compiled into a [`DtypeInferPlan`]; emission only
//! reads finished plans and definition records.
mod cg;
mod dispatch;
mod infer_dtype;
mod op_struct;
mod prelude;
mod render;

use anyhow::Result;
use ascir::infer::DtypeInferPlan;
use ascir::registry::{AscIrRegistry, OpDef};

use crate::settings::GeneratorSettings;

/// An operator left out of the header and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOp {
    pub type_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct GeneratedSource {
    pub header: String,
    /// Emitted operator types in header order.
    pub emitted: Vec<String>,
    pub skipped: Vec<SkippedOp>,
}

/// Render the header for every operator in `registry`, ordered by
/// registration site.
pub fn generate(registry: &AscIrRegistry, settings: &GeneratorSettings) -> Result<GeneratedSource> {
    settings.validate()?;
    let mut planned: Vec<(&OpDef, DtypeInferPlan)> = Vec::new();
    let mut skipped = Vec::new();
    for def in registry.sorted_defs() {
        if def.has_dynamic_output() {
            ascir::error!("skipping {}: dynamic output", def.type_name);
            skipped.push(SkippedOp {
                type_name: def.type_name.clone(),
                reason: "dynamic output".to_string(),
            });
            continue;
        }
        match DtypeInferPlan::compile(def) {
            Ok(plan) => planned.push((def, plan)),
            Err(err) => {
                ascir::error!("skipping {}: {err}", def.type_name);
                skipped.push(SkippedOp {
                    type_name: def.type_name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let header = render_header(&planned, settings);
    Ok(GeneratedSource {
        header,
        emitted: planned
            .iter()
            .map(|(def, _)| def.type_name.clone())
            .collect(),
        skipped,
    })
}

fn extra_includes(planned: &[(&OpDef, DtypeInferPlan)]) -> Vec<String> {
    let mut includes = planned
        .iter()
        .flat_map(|(def, _)| def.variants.iter())
        .filter_map(|variant| variant.codegen.as_ref())
        .flat_map(|factory| factory().extra_includes())
        .collect::<Vec<_>>();
    includes.sort();
    includes.dedup();
    includes
}

fn render_header(planned: &[(&OpDef, DtypeInferPlan)], settings: &GeneratorSettings) -> String {
    let mut out = prelude::emit_prelude(settings, &extra_includes(planned));
    for (def, plan) in planned {
        ascir::trace!("emitting {} ({})", def.type_name, plan.strategy.tag());
        out.push_str(&op_struct::emit_op_struct(def, plan, settings));
    }
    let names = planned
        .iter()
        .map(|(def, _)| def.type_name.as_str())
        .collect::<Vec<_>>();
    out.push_str(&dispatch::emit_dispatch_functions(&names));
    out.push_str(&prelude::emit_cg_open(settings));
    for (def, _) in planned {
        out.push_str(&cg::emit_cg_functions(def, settings.op_namespace()));
    }
    out.push_str(&prelude::emit_epilogue(settings));
    out
}
