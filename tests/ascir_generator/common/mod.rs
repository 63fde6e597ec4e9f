#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use ascir_generator::{generate, GeneratedSource, GeneratorSettings};

use crate::stubs::{builtin_registry, stub_registry};

pub fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/ascir_generator/fixtures")
        .join(rel)
}

pub fn generate_stubs() -> Result<GeneratedSource> {
    generate(&stub_registry()?, &GeneratorSettings::default())
}

pub fn generate_builtins() -> Result<GeneratedSource> {
    generate(&builtin_registry()?, &GeneratorSettings::default())
}

/// Collapse every whitespace run so snippets match regardless of indentation.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn assert_contains(haystack: &str, needle: &str) -> Result<()> {
    if normalize(haystack).contains(&normalize(needle)) {
        Ok(())
    } else {
        Err(anyhow!("generated source is missing:\n{needle}"))
    }
}

pub fn assert_not_contains(haystack: &str, needle: &str) -> Result<()> {
    if normalize(haystack).contains(&normalize(needle)) {
        Err(anyhow!("generated source unexpectedly contains:\n{needle}"))
    } else {
        Ok(())
    }
}

/// Text of `struct <name>` up to its closing brace.
pub fn struct_block<'a>(header: &'a str, name: &str) -> Result<&'a str> {
    let open = format!("struct {name} : public AscIrOpBase {{\n");
    let start = header
        .find(&open)
        .ok_or_else(|| anyhow!("struct {name} not emitted"))?;
    let rest = &header[start..];
    let end = rest
        .find("\n};\n")
        .ok_or_else(|| anyhow!("struct {name} is not closed"))?;
    Ok(&rest[..end + 4])
}

/// Body of one static method inside a struct block.
pub fn method_block<'a>(block: &'a str, method: &str) -> Result<&'a str> {
    let open = format!("inline static ge::Status {method}(");
    let start = block
        .find(&open)
        .ok_or_else(|| anyhow!("method {method} not emitted"))?;
    let rest = &block[start..];
    let end = rest
        .find("\n  }\n")
        .ok_or_else(|| anyhow!("method {method} is not closed"))?;
    Ok(&rest[..end + 5])
}
