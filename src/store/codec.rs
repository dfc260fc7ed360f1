//! Payload codec shared by the byte-oriented backends.

use tracing::warn;

use super::Payload;

/// Serializes a payload for backends that persist bytes.
pub fn encode(payload: &Payload) -> Option<Vec<u8>> {
    match serde_json::to_vec(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Failed to encode payload: {}", e);
            None
        }
    }
}

/// Parses bytes written by [`encode`]. Unreadable bytes are treated as absent.
pub fn decode(bytes: &[u8]) -> Option<Payload> {
    match serde_json::from_slice(bytes) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!("Discarding unreadable payload: {}", e);
            None
        }
    }
}
