// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Seams between the mixer and whatever holds the records.

pub mod memory;

pub use memory::VecSource;

/// A finite, 0-indexed sequence of records with random access.
pub trait RecordSource {
    type Record;
    type Error;

    /// Number of records available. Fixed for the lifetime of the source.
    fn count(&self) -> u64;

    /// Returns an owned copy of the record at `index`.
    ///
    /// Callers keep `index < count()`.
    fn read_at(&mut self, index: u64) -> Result<Self::Record, Self::Error>;
}

/// Append-only destination for merged records.
pub trait RecordSink<R> {
    type Error;

    fn append(&mut self, record: R) -> Result<(), Self::Error>;
}

impl<R> RecordSink<R> for Vec<R> {
    type Error = core::convert::Infallible;

    fn append(&mut self, record: R) -> Result<(), Self::Error> {
        self.push(record);
        Ok(())
    }
}
