use crate::error::{PersistenceError, Result};
use byteorder::{ByteOrder, LittleEndian};
use crc64fast::Digest;

/// Fixed prefix of every stored event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub index: u64,
    pub payload_len: u32,
    pub checksum: u64,
}

impl FrameHeader {
    pub const SIZE: usize = 8 + 4 + 8; // 20 bytes

    pub fn for_payload(index: u64, payload: &[u8]) -> Result<Self> {
        let payload_len = u32::try_from(payload.len()).map_err(|_| {
            PersistenceError::InvalidFormat(format!(
                "event payload of {} bytes is too large",
                payload.len()
            ))
        })?;
        Ok(Self {
            index,
            payload_len,
            checksum: checksum(index, payload_len, payload),
        })
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < Self::SIZE {
            return Err(PersistenceError::InvalidFormat(format!(
                "truncated frame header: {} of {} bytes",
                buf.len(),
                Self::SIZE
            )));
        }
        Ok(Self {
            index: LittleEndian::read_u64(&buf[0..8]),
            payload_len: LittleEndian::read_u32(&buf[8..12]),
            checksum: LittleEndian::read_u64(&buf[12..20]),
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        LittleEndian::write_u64(&mut buf[0..8], self.index);
        LittleEndian::write_u32(&mut buf[8..12], self.payload_len);
        LittleEndian::write_u64(&mut buf[12..20], self.checksum);
        buf
    }

    /// Total bytes the frame occupies on disk.
    pub fn frame_len(&self) -> usize {
        Self::SIZE + self.payload_len as usize
    }

    pub fn verify(&self, payload: &[u8]) -> Result<()> {
        let found = checksum(self.index, self.payload_len, payload);
        if found != self.checksum {
            return Err(PersistenceError::ChecksumMismatch {
                index: self.index,
                expected: self.checksum,
                found,
            });
        }
        Ok(())
    }
}

fn checksum(index: u64, payload_len: u32, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&index.to_le_bytes());
    digest.write(&payload_len.to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_header_serialization() {
        let payload = b"hello world";
        let header = FrameHeader::for_payload(1, payload).unwrap();

        let bytes = header.to_bytes();
        let decoded = FrameHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header, decoded);
        assert_eq!(decoded.frame_len(), FrameHeader::SIZE + payload.len());
        decoded.verify(payload).unwrap();
    }

    #[test]
    fn test_flipped_payload_bit_detected() {
        let header = FrameHeader::for_payload(3, b"tracks").unwrap();
        let result = header.verify(b"tracKs");
        assert!(matches!(result, Err(PersistenceError::ChecksumMismatch { index: 3, .. })));
    }

    #[test]
    fn test_short_buffer_rejected() {
        let result = FrameHeader::from_bytes(&[0u8; 7]);
        assert!(matches!(result, Err(PersistenceError::InvalidFormat(_))));
    }
}
