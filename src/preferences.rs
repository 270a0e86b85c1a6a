//! The single persisted user preference: background music on/off.
//!
//! Stored under [`crate::MUSIC_PREF_KEY`] as a JSON-encoded boolean.
//! Reads fall back to the default on any missing or corrupt value; writes
//! are best-effort and never interrupt the toggle that triggered them.

use tracing::warn;

/// Music is on for first-run users.
pub const DEFAULT_ENABLED: bool = true;

#[must_use]
pub fn encode(enabled: bool) -> Vec<u8> {
    // A bare boolean cannot fail to serialize.
    serde_json::to_vec(&enabled).unwrap_or_else(|_| b"true".to_vec())
}

#[must_use]
pub fn decode(stored: Option<&[u8]>) -> bool {
    let Some(bytes) = stored else {
        return DEFAULT_ENABLED;
    };
    match serde_json::from_slice(bytes) {
        Ok(enabled) => enabled,
        Err(error) => {
            warn!(%error, "stored music preference is corrupt, using default");
            DEFAULT_ENABLED
        }
    }
}
