// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use core::convert::Infallible;

use crate::stream::RecordSource;

/// In-memory source. Records every index it is asked for, so callers can
/// check exactly which entries a merge touched.
#[derive(Debug, Clone)]
pub struct VecSource<R> {
    records: Vec<R>,
    reads: Vec<u64>,
}

impl<R> VecSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            reads: Vec::new(),
        }
    }

    /// Indices passed to `read_at`, in call order.
    pub fn reads(&self) -> &[u64] {
        &self.reads
    }

    pub fn into_inner(self) -> Vec<R> {
        self.records
    }
}

impl<R> From<Vec<R>> for VecSource<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

impl<R: Clone> RecordSource for VecSource<R> {
    type Record = R;
    type Error = Infallible;

    fn count(&self) -> u64 {
        self.records.len() as u64
    }

    fn read_at(&mut self, index: u64) -> Result<R, Infallible> {
        self.reads.push(index);
        Ok(self.records[index as usize].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_tracks_reads() {
        let mut source = VecSource::new(vec!["x", "y", "z"]);
        assert_eq!(source.count(), 3);
        assert_eq!(source.read_at(2).unwrap(), "z");
        assert_eq!(source.read_at(0).unwrap(), "x");
        assert_eq!(source.reads(), &[2, 0]);
    }
}
