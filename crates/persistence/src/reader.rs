//! Memory-mapped store reader with random access by entry index.

use crate::codec::decode_record;
use crate::error::{PersistenceError, Result};
use crate::frame::FrameHeader;
use crate::header::{StoreFooter, StoreHeader};
use kinemix::{EventRecord, RecordSource, SeriesId};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct StoreReader {
    path: PathBuf,
    header: StoreHeader,
    mmap: Option<Mmap>,
    /// Byte offset of each frame, by entry index.
    offsets: Vec<usize>,
}

impl StoreReader {
    /// Opens the store at `path` and checks that it holds `series`.
    ///
    /// The whole entry region is scanned once to index frame offsets;
    /// payload checksums are verified lazily on read.
    pub fn open(path: impl AsRef<Path>, series: &SeriesId) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| PersistenceError::NotFound {
            path: path.clone(),
            source,
        })?;

        let file_len = file.metadata()?.len();
        if file_len < StoreHeader::MIN_SIZE as u64 {
            return Err(PersistenceError::InvalidFormat(format!(
                "{} bytes is too short for a store header",
                file_len
            )));
        }

        let mmap = unsafe { Mmap::map(&file)? };

        let mut rest = &mmap[..];
        let header = StoreHeader::read_from(&mut rest)?;
        if header.series != *series {
            return Err(PersistenceError::SchemaMismatch {
                expected: series.clone(),
                found: header.series,
            });
        }

        let body_start = mmap.len() - rest.len();
        let body_end = mmap
            .len()
            .checked_sub(StoreFooter::SIZE)
            .filter(|end| *end >= body_start)
            .ok_or(PersistenceError::Unfinalized)?;
        let footer = StoreFooter::from_bytes(&mmap[body_end..])?;

        let offsets = index_frames(&mmap[..body_end], body_start)?;
        if offsets.len() as u64 != footer.entry_count {
            return Err(PersistenceError::InvalidFormat(format!(
                "footer records {} events but {} were found",
                footer.entry_count,
                offsets.len()
            )));
        }

        info!(
            path = %path.display(),
            series = %header.series,
            events = offsets.len(),
            "opened store"
        );

        Ok(Self {
            path,
            header,
            mmap: Some(mmap),
            offsets,
        })
    }

    pub fn count(&self) -> u64 {
        self.offsets.len() as u64
    }

    pub fn header(&self) -> &StoreHeader {
        &self.header
    }

    pub fn series(&self) -> &SeriesId {
        &self.header.series
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checksum-verified payload bytes of entry `index`.
    pub fn payload(&self, index: u64) -> Result<&[u8]> {
        let mmap = self.mmap.as_ref().ok_or(PersistenceError::Closed)?;
        let offset = usize::try_from(index)
            .ok()
            .and_then(|i| self.offsets.get(i))
            .copied()
            .ok_or(PersistenceError::IndexOutOfRange {
                index,
                count: self.count(),
            })?;

        let frame = FrameHeader::from_bytes(&mmap[offset..])?;
        let start = offset + FrameHeader::SIZE;
        let payload = &mmap[start..start + frame.payload_len as usize];
        frame.verify(payload)?;
        Ok(payload)
    }

    /// Decodes entry `index`. Each call returns a fresh, owned record.
    pub fn read_at(&self, index: u64) -> Result<EventRecord> {
        decode_record(self.payload(index)?)
    }

    /// Sequential access from the first entry.
    pub fn iter(&self) -> impl Iterator<Item = Result<EventRecord>> + '_ {
        (0..self.count()).map(move |index| self.read_at(index))
    }

    /// Releases the mapping. Safe to call more than once.
    pub fn close(&mut self) {
        self.mmap = None;
    }

    pub fn is_closed(&self) -> bool {
        self.mmap.is_none()
    }
}

impl RecordSource for StoreReader {
    type Record = EventRecord;
    type Error = PersistenceError;

    fn count(&self) -> u64 {
        StoreReader::count(self)
    }

    fn read_at(&mut self, index: u64) -> Result<EventRecord> {
        StoreReader::read_at(self, index)
    }
}

/// Walks the frames in `data[start..]`, checking sequence numbers and bounds.
fn index_frames(data: &[u8], start: usize) -> Result<Vec<usize>> {
    let mut offsets = Vec::new();
    let mut pos = start;

    while pos < data.len() {
        let frame = FrameHeader::from_bytes(&data[pos..])?;
        let expected = offsets.len() as u64;
        if frame.index != expected {
            return Err(PersistenceError::InvalidFormat(format!(
                "frame at byte {} has index {}, expected {}",
                pos, frame.index, expected
            )));
        }

        let next = pos + frame.frame_len();
        if next > data.len() {
            return Err(PersistenceError::InvalidFormat(format!(
                "frame {} runs past the end of the store",
                frame.index
            )));
        }

        offsets.push(pos);
        pos = next;
    }

    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::StoreWriter;
    use kinemix::Track;
    use std::fs;
    use tempfile::tempdir;

    fn event(pdg: i32, n: usize) -> EventRecord {
        EventRecord::new(
            (0..n)
                .map(|i| Track {
                    pdg,
                    first_daughter: i as i32,
                    ..Track::default()
                })
                .collect(),
        )
    }

    fn write(path: &Path, records: &[EventRecord]) {
        let mut writer = StoreWriter::create(path, SeriesId::default()).unwrap();
        for record in records {
            writer.append(record).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_random_access_after_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.kmix");
        let records = vec![event(211, 2), event(22, 0), event(2212, 5)];
        write(&path, &records);

        let reader = StoreReader::open(&path, &SeriesId::default()).unwrap();
        assert_eq!(reader.count(), 3);
        assert_eq!(reader.read_at(2).unwrap(), records[2]);
        assert_eq!(reader.read_at(0).unwrap(), records[0]);

        let all: Vec<EventRecord> = reader.iter().collect::<Result<_>>().unwrap();
        assert_eq!(all, records);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let result = StoreReader::open(dir.path().join("absent.kmix"), &SeriesId::default());
        assert!(matches!(result, Err(PersistenceError::NotFound { .. })));
    }

    #[test]
    fn test_wrong_series_is_schema_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.kmix");
        write(&path, &[event(11, 1)]);

        let wanted = SeriesId::new("o2sim", "TrackRefs");
        match StoreReader::open(&path, &wanted) {
            Err(PersistenceError::SchemaMismatch { expected, found }) => {
                assert_eq!(expected, wanted);
                assert_eq!(found, SeriesId::default());
            }
            Err(e) => panic!("Expected SchemaMismatch, got {e}"),
            Ok(_) => panic!("Expected SchemaMismatch"),
        }
    }

    #[test]
    fn test_unfinalized_store_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.kmix");

        {
            let mut writer = StoreWriter::create(&path, SeriesId::default()).unwrap();
            writer.append(&event(211, 3)).unwrap();
            // Dropped without finalize; BufWriter still flushes on drop.
        }

        let result = StoreReader::open(&path, &SeriesId::default());
        assert!(matches!(result, Err(PersistenceError::Unfinalized)));
    }

    #[test]
    fn test_corrupted_payload_detected_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.kmix");
        write(&path, &[event(211, 4)]);

        let mut bytes = fs::read(&path).unwrap();
        let header_len = StoreHeader::new(SeriesId::default()).encoded_len();
        bytes[header_len + FrameHeader::SIZE + 1] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        let reader = StoreReader::open(&path, &SeriesId::default()).unwrap();
        let result = reader.read_at(0);
        assert!(matches!(result, Err(PersistenceError::ChecksumMismatch { index: 0, .. })));
    }

    #[test]
    fn test_out_of_range_and_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.kmix");
        write(&path, &[event(13, 1)]);

        let mut reader = StoreReader::open(&path, &SeriesId::default()).unwrap();
        assert!(matches!(
            reader.read_at(1),
            Err(PersistenceError::IndexOutOfRange { index: 1, count: 1 })
        ));

        reader.close();
        reader.close();
        assert!(reader.is_closed());
        assert!(matches!(reader.read_at(0), Err(PersistenceError::Closed)));
        assert_eq!(reader.count(), 1);
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.kmix");
        fs::write(&path, b"KMIX").unwrap();

        let result = StoreReader::open(&path, &SeriesId::default());
        assert!(matches!(result, Err(PersistenceError::InvalidFormat(_))));
    }
}
