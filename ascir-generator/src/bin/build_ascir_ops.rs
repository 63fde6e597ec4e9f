use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Result};
use ascir::ops::register_builtin_ops;
use ascir::registry::Manifest;
use ascir_generator::{generate, GeneratorSettings};

const USAGE: &str = "usage: build_ascir_ops <output-header> [settings.json]";
const MANIFEST_FILE: &str = "ascir_ops.json";

fn main() {
    if let Err(err) = run() {
        ascir::critical!("build_ascir_ops: {err}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let header_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!(USAGE))?;
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = GeneratorSettings::load(&settings_path)?;

    {
        let mut registry = ascir::registry_mut();
        registry.clear_all();
        register_builtin_ops(&mut registry)?;
    }
    let registry = ascir::registry();
    let generated = generate(&registry, &settings)?;

    let total = generated.emitted.len();
    for (idx, name) in generated.emitted.iter().enumerate() {
        let line = format!("[{}/{}] -- generating ascir op {}", idx + 1, total, name);
        print!("\r{:<120}", line);
        let _ = io::stdout().flush();
    }
    println!();
    for skipped in &generated.skipped {
        println!("skipped {}: {}", skipped.type_name, skipped.reason);
    }

    write_file(&header_path, &generated.header)?;
    let manifest_path = header_path.with_file_name(MANIFEST_FILE);
    write_file(&manifest_path, &Manifest::from_registry(&registry).to_json()?)?;
    println!(
        "wrote {} ({} ops, {} skipped) and {}",
        header_path.display(),
        total,
        generated.skipped.len(),
        manifest_path.display()
    );
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| anyhow!("failed to create {}: {err}", parent.display()))?;
    }
    fs::write(path, contents).map_err(|err| anyhow!("failed to write {}: {err}", path.display()))
}
