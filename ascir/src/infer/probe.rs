//! Source of the current soc version string.

/// Success code of the runtime's soc version query.
pub const RT_ERROR_NONE: i32 = 0;

/// Soc version buffer length the generated code passes to the runtime.
pub const SOC_VERSION_MAX_LEN: usize = 128;

pub trait ArchProbe {
    /// The soc version string, or the runtime's non-zero result code.
    fn soc_version(&self) -> Result<String, i32>;
}

/// A plain string answers itself.
impl ArchProbe for str {
    fn soc_version(&self) -> Result<String, i32> {
        Ok(self.to_string())
    }
}

impl ArchProbe for String {
    fn soc_version(&self) -> Result<String, i32> {
        Ok(self.clone())
    }
}

/// Stand-in for the runtime call: a fixed answer and result code, with the
/// version truncated to what fits the fixed-size buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProbe {
    pub soc_version: String,
    pub result: i32,
    pub max_len: usize,
}

impl SystemProbe {
    pub fn new(soc_version: &str) -> Self {
        Self {
            soc_version: soc_version.to_string(),
            result: RT_ERROR_NONE,
            max_len: SOC_VERSION_MAX_LEN,
        }
    }

    pub fn failing(result: i32) -> Self {
        Self {
            soc_version: String::new(),
            result,
            max_len: SOC_VERSION_MAX_LEN,
        }
    }
}

impl ArchProbe for SystemProbe {
    fn soc_version(&self) -> Result<String, i32> {
        if self.result != RT_ERROR_NONE {
            return Err(self.result);
        }
        // room for the terminating NUL
        let limit = self.max_len.saturating_sub(1);
        Ok(self.soc_version.chars().take(limit).collect())
    }
}
