//! Event payload encoding (bincode, standard config).

use crate::error::{PersistenceError, Result};
use kinemix::EventRecord;

pub fn encode_record(record: &EventRecord) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| PersistenceError::Codec(e.to_string()))
}

pub fn decode_record(payload: &[u8]) -> Result<EventRecord> {
    let (record, consumed): (EventRecord, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(|e| PersistenceError::Codec(e.to_string()))?;

    if consumed != payload.len() {
        return Err(PersistenceError::Codec(format!(
            "{} trailing bytes after event payload",
            payload.len() - consumed
        )));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinemix::Track;

    #[test]
    fn test_trailing_bytes_rejected() {
        let record = EventRecord::new(vec![Track { pdg: 22, ..Track::default() }]);
        let mut payload = encode_record(&record).unwrap();
        assert_eq!(decode_record(&payload).unwrap(), record);

        payload.push(0);
        assert!(matches!(decode_record(&payload), Err(PersistenceError::Codec(_))));
    }

    #[test]
    fn test_garbage_payload_is_codec_error() {
        let result = decode_record(&[0xFF; 3]);
        assert!(matches!(result, Err(PersistenceError::Codec(_))));
    }
}
