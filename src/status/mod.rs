//! Device status document and its decoder.
//!
//! The SoundBot answers `GET /status` with a flat JSON object.  Every field
//! is device-supplied and untrusted: required fields must be present and
//! well-typed, optional ones default when absent, and unknown keys are
//! ignored so newer firmware does not break older clients.
//!
//! ```text
//!  bytes ──▶ decode() ──▶ RawStatus ──▶ classify::* ──▶ DisplayState
//! ```

pub mod classify;
pub mod uptime;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// One decoded status snapshot, exactly as the device reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatus {
    /// Raw sound accumulator (unit-less, may be negative while settling).
    pub avg: f64,
    /// Loudness band, 1..=3 nominal; anything else means "very loud".
    pub level: i64,
    /// Robot motion code, 0..=4.
    pub state: i64,
    /// Obstacle distance in centimetres; `>= 999` means nothing in range.
    pub distance: i64,
    /// Ambient baseline; carried but not displayed.
    pub ambient: f64,
    /// Milliseconds since device boot.
    pub uptime: u64,
    /// Whether the device's MQTT uplink is up.
    #[serde(default, alias = "mqttConnected")]
    pub mqtt_connected: bool,
    /// Stations currently associated with the device AP.
    #[serde(default, alias = "connectedStations")]
    pub connected_stations: u32,
}

/// Parse a status payload.
///
/// Pure function: the same bytes always produce the same result.
pub fn decode(bytes: &[u8]) -> Result<RawStatus, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}
