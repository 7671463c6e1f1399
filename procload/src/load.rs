//! One request's worth of host load: both samplers, read from configurable paths.

use crate::cpu::{sample_cpu_used_fraction_from, PROC_STAT};
use crate::error::Result;
use crate::format::{format_cpu, format_mem};
use crate::mem::{sample_memory_used_fraction_from, PROC_MEMINFO};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of the two pseudo-files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub stat: PathBuf,
    pub meminfo: PathBuf,
}

impl SourcePaths {
    /// `stat` and `meminfo` inside `root` (normally `/proc`).
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        SourcePaths {
            stat: root.join("stat"),
            meminfo: root.join("meminfo"),
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        SourcePaths {
            stat: PathBuf::from(PROC_STAT),
            meminfo: PathBuf::from(PROC_MEMINFO),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostLoad {
    pub cpu_used: f64,
    pub mem_used: f64,
}

impl HostLoad {
    /// Samples CPU then memory; the first failure is returned.
    pub fn sample(paths: &SourcePaths) -> Result<Self> {
        let cpu_used = sample_cpu_used_fraction_from(&paths.stat)?;
        let mem_used = sample_memory_used_fraction_from(&paths.meminfo)?;
        debug!(cpu_used, mem_used, "sampled host load");
        Ok(HostLoad { cpu_used, mem_used })
    }

    pub fn cpu_header_value(&self) -> String {
        format_cpu(self.cpu_used)
    }

    pub fn mem_header_value(&self) -> String {
        format_mem(self.mem_used)
    }
}
