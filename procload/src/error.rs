//! Error taxonomy shared by the samplers.

use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SamplerError>;

/// Coarse classification of a [`SamplerError`], for callers that only need to
/// branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerErrorKind {
    SourceUnavailable,
    ReadError,
    MalformedData,
}

#[derive(Debug, Error)]
pub enum SamplerError {
    /// The pseudo-file could not be opened (missing, permission denied).
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// I/O failure while reading an already-open source.
    #[error("read failed: {0}")]
    ReadError(#[source] io::Error),
    /// Content does not have the expected shape, or would yield an undefined ratio.
    #[error("malformed data: {0}")]
    MalformedData(String),
}

impl SamplerError {
    pub fn kind(&self) -> SamplerErrorKind {
        match self {
            SamplerError::SourceUnavailable { .. } => SamplerErrorKind::SourceUnavailable,
            SamplerError::ReadError(_) => SamplerErrorKind::ReadError,
            SamplerError::MalformedData(_) => SamplerErrorKind::MalformedData,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SamplerError::MalformedData(msg.into())
    }
}
