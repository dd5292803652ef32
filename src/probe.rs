//! Connectivity probe.
//!
//! Answers one question per tick: is the host on the SoundBot's access
//! point right now?  The probe is fail-closed: if the host cannot tell,
//! the answer is "no".

use log::{debug, warn};

use crate::adapters::utils::unquote_ssid;
use crate::app::ports::SsidSource;

/// Exact-match SSID predicate over an [`SsidSource`].
pub struct ConnectivityProbe<S> {
    source: S,
    target: String,
}

impl<S: SsidSource> ConnectivityProbe<S> {
    pub fn new(source: S, target: &str) -> Self {
        Self {
            source,
            target: target.to_owned(),
        }
    }

    /// `true` only when the host reports an association whose SSID equals
    /// the target exactly (after stripping Android-style quotes).
    pub fn is_target_network_active(&self) -> bool {
        match self.source.current_ssid() {
            Ok(Some(raw)) => {
                debug!("Wi-Fi SSID: {}", raw);
                unquote_ssid(&raw) == self.target
            }
            Ok(None) => false,
            Err(e) => {
                warn!("SSID query failed, treating as disconnected: {}", e);
                false
            }
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
