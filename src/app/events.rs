//! One-shot notifications for the UI layer.
//!
//! Unlike [`DisplayState`](crate::display::DisplayState)s, which are
//! re-emitted every tick, each of these fires exactly once per occurrence.
//! The UI decides how to surface them (toast, vibration, sound).

/// Structured one-shot events emitted by the polling core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// The host just joined the device access point.
    Connected { ssid: String },

    /// The host just left the device access point.
    Disconnected,

    /// The sound level changed to a noteworthy band; play haptic feedback.
    Haptic { level: i64 },

    /// Consecutive fetch failures reached the threshold.
    ConnectionIssues { failures: u32 },
}
