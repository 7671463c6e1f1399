//! Opening and line-reading helpers shared by both samplers.

use crate::error::{Result, SamplerError};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Longest accepted line, newline included. Real `/proc/stat` and
/// `/proc/meminfo` lines are well below this.
pub(crate) const MAX_LINE_SIZE: usize = 256;

pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SamplerError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads the next line, without its line terminator. `Ok(None)` at end of input.
///
/// Lines longer than [`MAX_LINE_SIZE`] are rejected instead of being split, so a
/// truncated line can never be parsed as if it were complete.
pub(crate) fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut bytes = Vec::with_capacity(MAX_LINE_SIZE);
    let n = reader
        .by_ref()
        .take(MAX_LINE_SIZE as u64 + 1)
        .read_until(b'\n', &mut bytes)
        .map_err(SamplerError::ReadError)?;
    if n == 0 {
        return Ok(None);
    }
    if n > MAX_LINE_SIZE {
        return Err(SamplerError::malformed(format!(
            "line exceeds {MAX_LINE_SIZE} bytes"
        )));
    }
    let mut line =
        String::from_utf8(bytes).map_err(|_| SamplerError::malformed("line is not valid UTF-8"))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
