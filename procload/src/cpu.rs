//! CPU utilization from the aggregate line of `/proc/stat`.
//!
//! Only one read is taken, so the reported figure is the share of non-idle
//! time since boot rather than load over a recent window. On a long-running
//! host it drifts towards a stable average; diffing two reads would be needed
//! for a true instantaneous rate.

use crate::error::{Result, SamplerError};
use crate::source::{next_line, open};
use std::io::{self, BufRead};
use std::path::Path;

pub const PROC_STAT: &str = "/proc/stat";

/// Cumulative tick counters from one `cpu` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSample {
    pub label: String,
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuSample {
    /// Parses `<label> <user> <nice> <system> <idle> ...`; trailing fields
    /// (iowait, irq, ...) are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let mut it = line.split_whitespace();
        let label = it
            .next()
            .ok_or_else(|| SamplerError::malformed("empty cpu line"))?
            .to_string();
        let mut field = |name: &str| -> Result<u64> {
            let tok = it
                .next()
                .ok_or_else(|| SamplerError::malformed(format!("cpu line has no {name} field")))?;
            tok.parse::<u64>().map_err(|_| {
                SamplerError::malformed(format!("cpu {name} field is not an unsigned integer: {tok:?}"))
            })
        };
        let user = field("user")?;
        let nice = field("nice")?;
        let system = field("system")?;
        let idle = field("idle")?;
        Ok(CpuSample {
            label,
            user,
            nice,
            system,
            idle,
        })
    }

    /// Parses the first line of `reader`.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let line = next_line(&mut reader)?.ok_or_else(|| {
            SamplerError::ReadError(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "cpu statistics source is empty",
            ))
        })?;
        Self::parse(&line)
    }

    /// Sum of the four counters; `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.user
            .checked_add(self.nice)?
            .checked_add(self.system)?
            .checked_add(self.idle)
    }

    pub fn idle_fraction(&self) -> Result<f64> {
        match self.total() {
            None => Err(SamplerError::malformed("cpu counters overflow")),
            Some(0) => Err(SamplerError::malformed("cpu counters are all zero")),
            Some(total) => Ok(self.idle as f64 / total as f64),
        }
    }

    pub fn used_fraction(&self) -> Result<f64> {
        Ok(1.0 - self.idle_fraction()?)
    }
}

/// Used CPU fraction read from `/proc/stat`.
pub fn sample_cpu_used_fraction() -> Result<f64> {
    sample_cpu_used_fraction_from(PROC_STAT)
}

/// Used CPU fraction read from a file in `/proc/stat` format.
pub fn sample_cpu_used_fraction_from(path: impl AsRef<Path>) -> Result<f64> {
    let reader = open(path.as_ref())?;
    CpuSample::from_reader(reader)?.used_fraction()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplerErrorKind;
    use std::fs;
    use std::io::Cursor;

    fn used(input: &str) -> Result<f64> {
        CpuSample::from_reader(Cursor::new(input))?.used_fraction()
    }

    #[test]
    fn quarter_busy() {
        let s = CpuSample::parse("cpu 100 0 0 300").unwrap();
        assert_eq!(s.label, "cpu");
        assert_eq!(s.total(), Some(400));
        assert_eq!(s.used_fraction().unwrap(), 0.25);
        assert_eq!(s.idle_fraction().unwrap(), 0.75);
    }

    #[test]
    fn real_proc_stat_layout() {
        let input = "cpu  4705 356 584 3699 23 23 0 0 0 0\n\
                     cpu0 1393 280 307 915 6 11 0 0 0 0\n\
                     intr 114930548 113199788 3 0 5 263 0 4 [... lots more numbers ...]\n";
        let got = used(input).unwrap();
        let expected = 1.0 - 3699.0 / (4705.0 + 356.0 + 584.0 + 3699.0);
        assert!((got - expected).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&got));
    }

    #[test]
    fn all_zero_is_malformed() {
        let err = used("cpu 0 0 0 0\n").unwrap_err();
        assert_eq!(err.kind(), SamplerErrorKind::MalformedData);
    }

    #[test]
    fn fully_idle_and_fully_busy() {
        assert_eq!(used("cpu 0 0 0 10\n").unwrap(), 0.0);
        assert_eq!(used("cpu 3 3 4 0\n").unwrap(), 1.0);
    }

    #[test]
    fn too_few_tokens_is_malformed() {
        for line in ["cpu", "cpu 1 2 3", "", "   "] {
            let err = CpuSample::parse(line).unwrap_err();
            assert_eq!(err.kind(), SamplerErrorKind::MalformedData, "line {line:?}");
        }
    }

    #[test]
    fn non_numeric_tokens_are_malformed() {
        for line in ["cpu x 0 0 1", "cpu 1 -2 0 1", "cpu 1 2 3.5 1", "cpu 1 2 3 idle"] {
            let err = CpuSample::parse(line).unwrap_err();
            assert_eq!(err.kind(), SamplerErrorKind::MalformedData, "line {line:?}");
        }
    }

    #[test]
    fn counter_overflow_is_malformed() {
        let s = CpuSample::parse(&format!("cpu {} 1 0 0", u64::MAX)).unwrap();
        assert_eq!(s.total(), None);
        assert_eq!(
            s.used_fraction().unwrap_err().kind(),
            SamplerErrorKind::MalformedData
        );
    }

    #[test]
    fn empty_source_is_read_error() {
        let err = used("").unwrap_err();
        assert_eq!(err.kind(), SamplerErrorKind::ReadError);
    }

    #[test]
    fn overlong_first_line_is_malformed() {
        let line = format!("cpu 1 1 1 1{}\n", " 0".repeat(200));
        assert_eq!(used(&line).unwrap_err().kind(), SamplerErrorKind::MalformedData);
    }

    #[test]
    fn samples_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        fs::write(&path, "cpu 100 0 0 300 0 0 0 0 0 0\n").unwrap();
        assert_eq!(sample_cpu_used_fraction_from(&path).unwrap(), 0.25);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = sample_cpu_used_fraction_from(dir.path().join("stat")).unwrap_err();
        assert_eq!(err.kind(), SamplerErrorKind::SourceUnavailable);
    }

    #[test]
    fn repeated_sampling_does_not_leak_handles() {
        // Well past the usual 1024 open-file soft limit.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        fs::write(&path, "cpu 1 1 1 1\n").unwrap();
        for _ in 0..4096 {
            sample_cpu_used_fraction_from(&path).unwrap();
        }
        let bad = dir.path().join("bad");
        fs::write(&bad, "cpu 0 0 0 0\n").unwrap();
        for _ in 0..4096 {
            assert!(sample_cpu_used_fraction_from(&bad).is_err());
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn live_proc_stat_is_in_range() {
        let v = sample_cpu_used_fraction().unwrap();
        assert!((0.0..=1.0).contains(&v), "got {v}");
    }
}
