//! Pagination cursor codec
//!
//! Converts between the opaque `lastTrack` token clients echo back and the
//! internal track ordering key. The codec is the only authority on cursor
//! validity: callers treat the encoded form as an opaque string.

use crate::types::TrackKey;

/// Codec for the opaque track list continuation cursor.
///
/// The encoded form is the base-10 decimal of the key. Decoding is tolerant:
/// input that does not parse back into a key is treated as an absent cursor,
/// so a malformed token degrades to the first page instead of failing the
/// request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorCodec;

impl CursorCodec {
    /// Encode a key as an opaque cursor string.
    ///
    /// Deterministic and reversible: `decode(Some(&encode(k))) == Some(k)`
    /// for every key.
    pub fn encode(key: TrackKey) -> String {
        key.millis().to_string()
    }

    /// Decode a raw cursor parameter into a key.
    ///
    /// Returns `None` for an absent parameter and for anything that is not a
    /// base-10 integer in key range (empty, non-numeric, embedded whitespace,
    /// trailing garbage, overflow). `None` means "start from the beginning".
    pub fn decode(raw: Option<&str>) -> Option<TrackKey> {
        raw.and_then(|s| s.parse::<i64>().ok())
            .map(TrackKey::from_millis)
    }
}
