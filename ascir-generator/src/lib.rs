//! C++ header generation for registered AscIR operators.
//!
//! This crate turns the contents of an `ascir` registry into one header
//! holding an operator struct per type and the type-name dispatch functions.
//!
//! ## Modules
//! - `cpp`: header emission from definition records and inference plans.
//! - `settings`: header knobs read from `settings.json`.
//!
//! ## Usage
//! Register operators, then call [`generate`] or run the `build_ascir_ops` binary.
pub mod cpp;
pub mod settings;

pub use cpp::{generate, GeneratedSource, SkippedOp};
pub use settings::GeneratorSettings;
