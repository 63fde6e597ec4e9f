#[path = "../ascir/common/mod.rs"]
mod stubs;

#[path = "common/mod.rs"]
mod common;

#[path = "generator/generator_infer.rs"]
mod generator_infer;
#[path = "generator/generator_struct.rs"]
mod generator_struct;
#[path = "generator/generator_cg.rs"]
mod generator_cg;
#[path = "generator/generator_header.rs"]
mod generator_header;
#[path = "generator/generator_settings.rs"]
mod generator_settings;
