//! Poll loop configuration
//!
//! All tunable parameters for the SoundBot link core.
//! Defaults match the shipping firmware; every field can be overridden
//! from a JSON document.

use serde::{Deserialize, Serialize};

use crate::adapters::utils::is_printable_ascii;
use crate::error::ConfigError;

/// Name of the access point the SoundBot hosts.
pub const DEFAULT_TARGET_SSID: &str = "SoundBot-AP";

/// Status endpoint on the device's AP subnet.
pub const DEFAULT_STATUS_URL: &str = "http://192.168.4.1/status";

/// Linear calibration from the device's raw sound accumulator to dB.
///
/// The offset is tuned against the microphone in the current firmware
/// revision (earlier revisions used 55.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundCalibration {
    /// Multiplier applied to `avg`.
    pub scale: f64,
    /// Additive offset in dB.
    pub offset_db: f64,
}

impl Default for SoundCalibration {
    fn default() -> Self {
        Self {
            scale: 0.01,
            offset_db: 47.0,
        }
    }
}

/// Core poll loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    // --- Timing ---
    /// Delay between the end of one tick and the start of the next (milliseconds)
    pub poll_interval_ms: u32,
    /// Deadline for a single status request (milliseconds)
    pub request_timeout_ms: u32,

    // --- Degradation ---
    /// Consecutive failed fetches before the display is force-reset
    pub error_threshold: u32,

    // --- Device ---
    /// SSID of the device's access point (802.11 caps SSIDs at 32 bytes)
    pub target_ssid: heapless::String<32>,
    /// Full URL of the status endpoint
    pub status_url: String,

    // --- Display ---
    /// Raw-to-dB conversion for the sound reading
    pub sound_calibration: SoundCalibration,
}

impl Default for PollConfig {
    fn default() -> Self {
        let mut target_ssid = heapless::String::new();
        // Fits: the literal is well under 32 bytes.
        let _ = target_ssid.push_str(DEFAULT_TARGET_SSID);

        Self {
            // Timing
            poll_interval_ms: 1000,   // 1 Hz
            request_timeout_ms: 2500, // 2.5 ticks

            // Degradation
            error_threshold: 5,

            // Device
            target_ssid,
            status_url: DEFAULT_STATUS_URL.to_owned(),

            // Display
            sound_calibration: SoundCalibration::default(),
        }
    }
}

impl PollConfig {
    /// Parse a (possibly partial) JSON document over the defaults and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall, spin, or mis-target the poll loop.
    /// Invalid values are never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be greater than zero",
            ));
        }
        if self.request_timeout_ms < self.poll_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "request_timeout_ms must be at least poll_interval_ms",
            ));
        }
        if self.error_threshold == 0 {
            return Err(ConfigError::ValidationFailed(
                "error_threshold must be greater than zero",
            ));
        }
        if self.target_ssid.is_empty() || !is_printable_ascii(&self.target_ssid) {
            return Err(ConfigError::ValidationFailed(
                "target_ssid must be 1-32 printable ASCII bytes",
            ));
        }
        if !self.status_url.starts_with("http://") {
            return Err(ConfigError::ValidationFailed(
                "status_url must start with http://",
            ));
        }
        let cal = &self.sound_calibration;
        if !cal.scale.is_finite() || !cal.offset_db.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "sound_calibration must be finite",
            ));
        }
        Ok(())
    }
}
