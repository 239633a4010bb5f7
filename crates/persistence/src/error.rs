use kinemix::SeriesId;
use std::convert::Infallible;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Cannot open store {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Series {expected} not present in store (found {found})")]
    SchemaMismatch {
        expected: SeriesId,
        found: SeriesId,
    },
    #[error("Cannot create store {}: {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid magic bytes in header")]
    InvalidMagic,
    #[error("Unsupported store version {0}")]
    UnsupportedVersion(u32),
    #[error("Checksum mismatch at entry {index}: expected {expected}, found {found}")]
    ChecksumMismatch {
        index: u64,
        expected: u64,
        found: u64,
    },
    #[error("Store has no valid footer; the writer was never finalized")]
    Unfinalized,
    #[error("Entry {index} out of range for a store of {count} events")]
    IndexOutOfRange {
        index: u64,
        count: u64,
    },
    #[error("Store is closed")]
    Closed,
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
    #[error("Codec error: {0}")]
    Codec(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<Infallible> for PersistenceError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
