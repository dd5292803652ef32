//! Log-based display sink adapter.
//!
//! Implements [`DisplaySink`] by writing every snapshot and one-shot event
//! as a single structured log line.  Used by the host monitor binary; a UI
//! layer implements the same trait to paint widgets instead.

use log::{info, warn};

use crate::app::events::LinkEvent;
use crate::app::ports::DisplaySink;
use crate::display::{DisplayKind, DisplayState};

/// Adapter that logs every [`DisplayState`] and [`LinkEvent`].
///
/// Identical consecutive snapshots (the reset state repeats every tick
/// while off the AP) are logged once.
#[derive(Default)]
pub struct LogDisplaySink {
    last: Option<DisplayState>,
}

impl LogDisplaySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for LogDisplaySink {
    fn on_display_state(&mut self, state: &DisplayState) {
        if self.last.as_ref() == Some(state) {
            return;
        }
        match state.kind {
            DisplayKind::Live => {
                info!(
                    "STATUS | sound={} ({}) | robot={} | obstacle={} | mqtt={} | up={}",
                    state.sound_text,
                    state.sound_level.text,
                    state.robot_state.text,
                    state.distance.text,
                    state.link_status.text,
                    state.uptime,
                );
            }
            DisplayKind::Retrying { attempt } => {
                info!("STATUS | retrying (attempt {})", attempt);
            }
            DisplayKind::DataError => {
                info!("STATUS | parse error");
            }
            DisplayKind::Reset => {
                info!("STATUS | no data | button={}", state.connection_button.text);
            }
        }
        self.last = Some(state.clone());
    }

    fn on_event(&mut self, event: &LinkEvent) {
        match event {
            LinkEvent::Connected { ssid } => info!("LINK | successfully connected to {}", ssid),
            LinkEvent::Disconnected => info!("LINK | disconnected"),
            LinkEvent::Haptic { level } => info!("HAPTIC | sound level {}", level),
            LinkEvent::ConnectionIssues { failures } => {
                warn!("LINK | connection issues after {} failed requests", failures);
            }
        }
    }
}
