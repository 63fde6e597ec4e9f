//! Generator settings read from `settings.json`.
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Knobs of the emitted header. Every field falls back to its default when
/// absent from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Enclosing namespaces, outermost first. Operator structs live in the last one.
    pub namespaces: Vec<String>,
    pub header_guard: String,
    pub base_include: String,
    pub soc_version_buffer_len: usize,
    /// Namespace of the graph-building free functions, opened next to the
    /// innermost namespace.
    pub cg_namespace: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            namespaces: vec!["ge".to_string(), "ascir_op".to_string()],
            header_guard: "ASCIR_OPS_H_".to_string(),
            base_include: "ascir_op_base.h".to_string(),
            soc_version_buffer_len: 128,
            cg_namespace: "cg".to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Read settings from `path`. A missing file yields the defaults; the
    /// settings may sit at the top level or under an `"ascir"` key.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                ascir::trace!("no generator settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
        };
        Self::from_json(&contents)
            .map_err(|err| anyhow!("invalid settings {}: {err}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let section = value.get("ascir").cloned().unwrap_or(value);
        let settings: Self = serde_json::from_value(section)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespaces.is_empty() {
            return Err(anyhow!("settings need at least one namespace"));
        }
        if self.soc_version_buffer_len == 0 {
            return Err(anyhow!("soc_version_buffer_len must be positive"));
        }
        Ok(())
    }

    /// Namespace holding the operator structs.
    pub fn op_namespace(&self) -> &str {
        self.namespaces.last().map(String::as_str).unwrap_or("ascir_op")
    }
}
