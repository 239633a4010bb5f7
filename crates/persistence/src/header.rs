use crate::error::{PersistenceError, Result};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use crc64fast::Digest;
use kinemix::config::{FOOTER_MAGIC, STORE_MAGIC, STORE_VERSION};
use kinemix::SeriesId;
use std::io::{Read, Write};

/// Leading block of a store: magic, version and the series it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub series: SeriesId,
}

impl StoreHeader {
    /// Header size with both names empty.
    pub const MIN_SIZE: usize = 4 + 4 + 2 + 2;

    pub fn new(series: SeriesId) -> Self {
        Self {
            magic: STORE_MAGIC,
            version: STORE_VERSION,
            series,
        }
    }

    pub fn encoded_len(&self) -> usize {
        Self::MIN_SIZE + self.series.tree.len() + self.series.branch.len()
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        write_name(&mut writer, &self.series.tree)?;
        write_name(&mut writer, &self.series.branch)?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != STORE_MAGIC {
            return Err(PersistenceError::InvalidMagic);
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != STORE_VERSION {
            return Err(PersistenceError::UnsupportedVersion(version));
        }

        let tree = read_name(&mut reader)?;
        let branch = read_name(&mut reader)?;

        Ok(Self {
            magic,
            version,
            series: SeriesId { tree, branch },
        })
    }
}

fn write_name<W: Write>(writer: &mut W, name: &str) -> Result<()> {
    let len = u16::try_from(name.len()).map_err(|_| {
        PersistenceError::InvalidFormat(format!("series name of {} bytes is too long", name.len()))
    })?;
    writer.write_u16::<LittleEndian>(len)?;
    writer.write_all(name.as_bytes())?;
    Ok(())
}

fn read_name<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u16::<LittleEndian>()?;
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|e| {
            PersistenceError::InvalidFormat(format!("Invalid UTF-8 in series name: {}", e))
        })
}

/// Trailing block written by `StoreWriter::finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFooter {
    pub entry_count: u64,
}

impl StoreFooter {
    pub const SIZE: usize = 4 + 8 + 8; // 20 bytes

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&FOOTER_MAGIC);
        LittleEndian::write_u64(&mut buf[4..12], self.entry_count);
        LittleEndian::write_u64(&mut buf[12..20], count_checksum(self.entry_count));
        buf
    }

    /// Any footer that does not check out means the writer never finished.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() != Self::SIZE || buf[0..4] != FOOTER_MAGIC {
            return Err(PersistenceError::Unfinalized);
        }
        let entry_count = LittleEndian::read_u64(&buf[4..12]);
        let checksum = LittleEndian::read_u64(&buf[12..20]);
        if checksum != count_checksum(entry_count) {
            return Err(PersistenceError::Unfinalized);
        }
        Ok(Self { entry_count })
    }
}

fn count_checksum(entry_count: u64) -> u64 {
    let mut digest = Digest::new();
    digest.write(&entry_count.to_le_bytes());
    digest.sum64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_header_serialization() {
        let header = StoreHeader::new(SeriesId::new("o2sim", "MCTrack"));
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), header.encoded_len());

        let mut reader = &bytes[..];
        let decoded = StoreHeader::read_from(&mut reader).unwrap();
        assert_eq!(header, decoded);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = [0u8; StoreHeader::MIN_SIZE];
        bytes[0..4].copy_from_slice(b"BADM");
        let result = StoreHeader::read_from(&bytes[..]);
        assert!(matches!(result, Err(PersistenceError::InvalidMagic)));
    }

    #[test]
    fn test_unknown_version() {
        let mut bytes = Vec::new();
        StoreHeader::new(SeriesId::default()).write_to(&mut bytes).unwrap();
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        let result = StoreHeader::read_from(&bytes[..]);
        assert!(matches!(result, Err(PersistenceError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let header = StoreHeader::new(SeriesId::new("t".repeat(70_000), "b"));
        let result = header.write_to(Vec::new());
        assert!(matches!(result, Err(PersistenceError::InvalidFormat(_))));
    }

    #[test]
    fn test_footer_checksum() {
        let footer = StoreFooter { entry_count: 42 };
        let mut bytes = footer.to_bytes();
        assert_eq!(StoreFooter::from_bytes(&bytes).unwrap(), footer);

        bytes[5] ^= 0x01;
        assert!(matches!(StoreFooter::from_bytes(&bytes), Err(PersistenceError::Unfinalized)));
    }
}
