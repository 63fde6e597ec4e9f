use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::error::AscIrError;

use super::impls::{HardwareVariant, IrAttImpl, IrCodegenImpl, LookupMiss};
use super::op_def::OpDef;

/// Operator type name -> definition record.
#[derive(Debug, Default)]
pub struct AscIrRegistry {
    defs: HashMap<String, OpDef>,
}

static REGISTRY: Lazy<RwLock<AscIrRegistry>> = Lazy::new(|| RwLock::new(AscIrRegistry::new()));

/// Shared access to the process-wide registry.
pub fn registry() -> RwLockReadGuard<'static, AscIrRegistry> {
    REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Exclusive access to the process-wide registry. Registration and
/// `clear_all` must not overlap with generation.
pub fn registry_mut() -> RwLockWriteGuard<'static, AscIrRegistry> {
    REGISTRY.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AscIrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `def`, or union its implementation variants into the record
    /// already registered under `type_name`.
    pub fn register_asc_ir(&mut self, type_name: &str, def: OpDef) -> Result<(), AscIrError> {
        match self.defs.get_mut(type_name) {
            Some(existing) => {
                crate::trace!(
                    "merging {} soc impls into existing {}",
                    def.soc_impl_size(),
                    type_name
                );
                existing.merge(def);
                Ok(())
            }
            None => {
                self.defs.insert(type_name.to_string(), def);
                Ok(())
            }
        }
    }

    pub fn get_all(&self) -> &HashMap<String, OpDef> {
        &self.defs
    }

    pub fn get(&self, type_name: &str) -> Option<&OpDef> {
        self.defs.get(type_name)
    }

    /// Definitions sorted by (source file, line, type name).
    pub fn sorted_defs(&self) -> Vec<&OpDef> {
        let mut defs = self.defs.values().collect::<Vec<_>>();
        defs.sort_by(|a, b| {
            (a.file.as_str(), a.line, a.type_name.as_str())
                .cmp(&(b.file.as_str(), b.line, b.type_name.as_str()))
        });
        defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.defs.clear();
    }

    fn lookup(&self, soc: &str, type_name: &str) -> Result<&HardwareVariant, LookupMiss> {
        let def = self
            .defs
            .get(type_name)
            .ok_or_else(|| LookupMiss::UnknownType(type_name.to_string()))?;
        def.variant_for(soc).ok_or_else(|| LookupMiss::UnknownSocVersion {
            op: type_name.to_string(),
            soc: soc.to_string(),
        })
    }

    /// Fresh attribute implementation of `type_name` for `soc`.
    pub fn get_ir_att_impl(
        &self,
        soc: &str,
        type_name: &str,
    ) -> Result<Box<dyn IrAttImpl>, LookupMiss> {
        let result = self.lookup(soc, type_name).and_then(|variant| {
            variant
                .att
                .as_ref()
                .map(|factory| factory())
                .ok_or_else(|| LookupMiss::NullFactory {
                    op: type_name.to_string(),
                    soc: soc.to_string(),
                    what: "att",
                })
        });
        if let Err(miss) = &result {
            crate::trace!("no att impl: {miss}");
        }
        result
    }

    /// Fresh codegen implementation of `type_name` for `soc`.
    pub fn get_ir_codegen_impl(
        &self,
        soc: &str,
        type_name: &str,
    ) -> Result<Box<dyn IrCodegenImpl>, LookupMiss> {
        let result = self.lookup(soc, type_name).and_then(|variant| {
            variant
                .codegen
                .as_ref()
                .map(|factory| factory())
                .ok_or_else(|| LookupMiss::NullFactory {
                    op: type_name.to_string(),
                    soc: soc.to_string(),
                    what: "codegen",
                })
        });
        if let Err(miss) = &result {
            crate::trace!("no codegen impl: {miss}");
        }
        result
    }
}
