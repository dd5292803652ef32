//! Port traits — the hexagonal boundary between the poll loop and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PollSession / PollingController
//! ```
//!
//! Driven adapters (SSID query, HTTP transport, display sink) implement
//! these traits.  The core consumes them via generics, so it never touches
//! the host network stack or UI toolkit directly.

use core::future::Future;

use crate::display::DisplayState;
use crate::error::{NetworkError, ProbeError};

use super::events::LinkEvent;

// ───────────────────────────────────────────────────────────────
// SSID source (driven adapter: host network stack → core)
// ───────────────────────────────────────────────────────────────

/// Read-side port: reports which access point the host is associated with.
///
/// Implementations must be cheap enough to call once per poll tick and must
/// not block on the network.
pub trait SsidSource {
    /// `Ok(None)` when the host is not associated with any AP.
    fn current_ssid(&self) -> Result<Option<String>, ProbeError>;
}

// ───────────────────────────────────────────────────────────────
// HTTP transport (driven adapter: core → device)
// ───────────────────────────────────────────────────────────────

/// One-shot HTTP GET.
///
/// The returned future must not block the executor thread; blocking
/// clients run the request elsewhere and complete the future on settle.
/// No retries: the poll loop owns the retry policy.
pub trait HttpTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, NetworkError>>;
}

// ───────────────────────────────────────────────────────────────
// Display sink (driven adapter: core → UI)
// ───────────────────────────────────────────────────────────────

/// The core pushes snapshots and one-shot events through this port.
/// Adapters decide how they are rendered (widgets, log lines, FFI bridge).
pub trait DisplaySink {
    /// A new snapshot to render.  Called at most once per tick phase.
    fn on_display_state(&mut self, state: &DisplayState);

    /// A one-shot notification.
    fn on_event(&mut self, event: &LinkEvent);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn on_display_state(&mut self, state: &DisplayState) {
        (**self).on_display_state(state);
    }

    fn on_event(&mut self, event: &LinkEvent) {
        (**self).on_event(event);
    }
}
