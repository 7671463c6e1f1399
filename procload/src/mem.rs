//! Memory utilization from `/proc/meminfo`.

use crate::error::{Result, SamplerError};
use crate::source::{next_line, open};
use std::io::BufRead;
use std::path::Path;

pub const PROC_MEMINFO: &str = "/proc/meminfo";

const MEM_TOTAL: &str = "MemTotal";
const MEM_AVAILABLE: &str = "MemAvailable";

/// Total and available memory in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemorySample {
    /// Scans `<Field>: <value> kB` lines until both `MemTotal` and
    /// `MemAvailable` have been seen.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut total_kb = None;
        let mut available_kb = None;
        while total_kb.is_none() || available_kb.is_none() {
            let Some(line) = next_line(&mut reader)? else {
                break;
            };
            if let Some(v) = field_value(&line, MEM_TOTAL) {
                total_kb = Some(v?);
            } else if let Some(v) = field_value(&line, MEM_AVAILABLE) {
                available_kb = Some(v?);
            }
        }
        match (total_kb, available_kb) {
            (Some(total_kb), Some(available_kb)) => Ok(MemorySample {
                total_kb,
                available_kb,
            }),
            (None, _) => Err(SamplerError::malformed(format!("{MEM_TOTAL} not found"))),
            (_, None) => Err(SamplerError::malformed(format!(
                "{MEM_AVAILABLE} not found"
            ))),
        }
    }

    /// `(total - available) / total`, unclamped: available above total comes
    /// back negative.
    pub fn used_fraction(&self) -> Result<f64> {
        if self.total_kb == 0 {
            return Err(SamplerError::malformed(format!("{MEM_TOTAL} is zero")));
        }
        let total = self.total_kb as f64;
        Ok((total - self.available_kb as f64) / total)
    }
}

// `None` if the line is not `name:`; otherwise the parsed leading integer.
fn field_value(line: &str, name: &str) -> Option<Result<u64>> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    let value = rest
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse::<u64>().ok())
        .ok_or_else(|| SamplerError::malformed(format!("{name} has no integer value: {line:?}")));
    Some(value)
}

/// Used memory fraction read from `/proc/meminfo`.
pub fn sample_memory_used_fraction() -> Result<f64> {
    sample_memory_used_fraction_from(PROC_MEMINFO)
}

/// Used memory fraction read from a file in `/proc/meminfo` format.
pub fn sample_memory_used_fraction_from(path: impl AsRef<Path>) -> Result<f64> {
    let reader = open(path.as_ref())?;
    MemorySample::from_reader(reader)?.used_fraction()
}
