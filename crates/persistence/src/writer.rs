//! Append-only store writer.

use crate::codec::encode_record;
use crate::error::{PersistenceError, Result};
use crate::frame::FrameHeader;
use crate::header::{StoreFooter, StoreHeader};
use kinemix::{EventRecord, RecordSink, SeriesId};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a finalized store contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSummary {
    pub path: PathBuf,
    pub series: SeriesId,
    pub entries: u64,
    pub bytes_written: u64,
}

/// Writes events in append order. Call [`StoreWriter::finalize`] once done;
/// a store without its footer is rejected by readers.
pub struct StoreWriter {
    path: PathBuf,
    series: SeriesId,
    file: BufWriter<File>,
    entries: u64,
    bytes_written: u64,
}

impl StoreWriter {
    /// Creates or truncates the store at `path` and writes its header.
    pub fn create(path: impl AsRef<Path>, series: SeriesId) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| PersistenceError::CreateFailed {
            path: path.clone(),
            source,
        })?;

        let header = StoreHeader::new(series.clone());
        let mut file = BufWriter::new(file);
        header.write_to(&mut file)?;

        debug!(path = %path.display(), %series, "created store");

        Ok(Self {
            path,
            series,
            file,
            entries: 0,
            bytes_written: header.encoded_len() as u64,
        })
    }

    /// Adds `record` as the next entry.
    pub fn append(&mut self, record: &EventRecord) -> Result<()> {
        let payload = encode_record(record)?;
        let frame = FrameHeader::for_payload(self.entries, &payload)?;

        self.file.write_all(&frame.to_bytes())?;
        self.file.write_all(&payload)?;

        self.bytes_written += frame.frame_len() as u64;
        self.entries += 1;
        Ok(())
    }

    /// Entries appended so far.
    pub fn len(&self) -> u64 {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Writes the footer, flushes and syncs. Consumes the writer.
    pub fn finalize(mut self) -> Result<StoreSummary> {
        let footer = StoreFooter {
            entry_count: self.entries,
        };
        self.file.write_all(&footer.to_bytes())?;
        self.file.flush()?;
        self.file.get_ref().sync_all()?;
        self.bytes_written += StoreFooter::SIZE as u64;

        info!(
            path = %self.path.display(),
            events = self.entries,
            bytes = self.bytes_written,
            "finalized store"
        );

        Ok(StoreSummary {
            path: self.path,
            series: self.series,
            entries: self.entries,
            bytes_written: self.bytes_written,
        })
    }
}

impl RecordSink<EventRecord> for StoreWriter {
    type Error = PersistenceError;

    fn append(&mut self, record: EventRecord) -> Result<()> {
        StoreWriter::append(self, &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinemix::Track;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.kmix");

        let writer = StoreWriter::create(&path, SeriesId::default()).unwrap();
        assert!(path.exists());
        assert!(writer.is_empty());

        let header_len = StoreHeader::new(SeriesId::default()).encoded_len() as u64;
        assert_eq!(writer.bytes_written(), header_len);

        let summary = writer.finalize().unwrap();
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.bytes_written, header_len + StoreFooter::SIZE as u64);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), summary.bytes_written);
    }

    #[test]
    fn test_writer_counts_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.kmix");

        let mut writer = StoreWriter::create(&path, SeriesId::default()).unwrap();
        writer.append(&EventRecord::default()).unwrap();
        RecordSink::append(&mut writer, EventRecord::new(vec![Track::default()])).unwrap();
        assert_eq!(writer.len(), 2);

        let summary = writer.finalize().unwrap();
        assert_eq!(summary.entries, 2);
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.kmix");

        let result = StoreWriter::create(&path, SeriesId::default());
        assert!(matches!(result, Err(PersistenceError::CreateFailed { .. })));
    }
}
