//! Mutable state owned by the poll loop.
//!
//! `PollContext` is the single struct the session reads from and writes
//! to between ticks.  It lives from `start()` to `stop()` and is never
//! persisted.

/// Whether the host is currently on the device access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn from_probe(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

/// Per-session poll state.
#[derive(Debug, Clone, Default)]
pub struct PollContext {
    /// Failed fetches since the last success or reconnect.
    pub consecutive_errors: u32,
    /// Last observed connectivity.
    pub connection: ConnectionState,
    /// Level of the last haptic-worthy reading (0 before the first).
    pub last_sound_level: i64,
    /// Whether the owning session is between `start()` and `stop()`.
    pub polling_active: bool,
    /// Total ticks executed in this session.
    pub ticks: u64,
}

impl PollContext {
    /// Fresh context for a newly started session.
    pub fn started() -> Self {
        Self {
            polling_active: true,
            ..Self::default()
        }
    }
}
