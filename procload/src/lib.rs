//! Host load sampling for procload.
//!
//! Two leaf samplers read kernel pseudo-files and turn their counters into
//! fractions in `[0, 1]`:
//!
//! * [`cpu`]: aggregate `cpu` line of `/proc/stat`, reported as the complement
//!   of the idle share since boot.
//! * [`mem`]: `MemTotal` / `MemAvailable` from `/proc/meminfo`.
//!
//! Every call opens its own file handle and releases it before returning, so
//! samplers may be invoked concurrently from any number of requests.

pub mod cpu;
pub mod error;
pub mod format;
pub mod load;
pub mod mem;
mod source;

pub use cpu::{sample_cpu_used_fraction, sample_cpu_used_fraction_from, CpuSample};
pub use error::{Result, SamplerError, SamplerErrorKind};
pub use format::{format_cpu, format_mem};
pub use load::{HostLoad, SourcePaths};
pub use mem::{sample_memory_used_fraction, sample_memory_used_fraction_from, MemorySample};
