use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("not a readable file: {0:?}")]
    NotAFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("header signature mismatch: expected {expected:02X?}, found {found:02X?}")]
    SignatureMismatch { expected: Vec<u8>, found: Vec<u8> },

    #[error("file size mismatch: expected {expected} bytes, found {found} bytes")]
    SizeMismatch { expected: u64, found: u64 },

    #[error("content hash mismatch: expected {expected}, found {found}")]
    HashMismatch { expected: String, found: String },

    #[error("unexpected bytes at 0x{offset:X}: {found:02X?}")]
    PreconditionFailed { offset: u64, found: [u8; 2] },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backup to {path:?} failed: {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PatchError>;

impl PatchError {
    /// Stable reason code, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            PatchError::UnknownGame(_) => "unknown-game",
            PatchError::NotAFile(_) => "not-a-file",
            PatchError::Io(_) => "io-error",
            PatchError::SignatureMismatch { .. } => "signature-mismatch",
            PatchError::SizeMismatch { .. } => "size-mismatch",
            PatchError::HashMismatch { .. } => "hash-mismatch",
            PatchError::PreconditionFailed { .. } => "precondition-failed",
            PatchError::InvalidArgument(_) => "invalid-argument",
            PatchError::BackupFailed { .. } => "backup-failed",
        }
    }
}
