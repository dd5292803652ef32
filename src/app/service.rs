//! Poll session — the hexagonal core.
//!
//! [`PollSession`] owns the [`PollContext`] and decides, tick by tick, what
//! the UI should show.  It performs no I/O itself: the driver hands it the
//! probe result at the start of a tick and the fetch result when the
//! request settles, and it answers through a [`DisplaySink`].
//!
//! ```text
//!  probe ──▶ on_tick() ──▶ TickAction::Fetch(ticket)
//!                                │
//!                     (fetch runs elsewhere)
//!                                ▼
//!  probe ──▶ on_fetch_complete(ticket, result) ──▶ DisplaySink
//! ```
//!
//! Every fetch is identified by a [`FetchTicket`] carrying the session
//! epoch.  `start()` and `stop()` bump the epoch, so a completion that
//! belongs to an earlier session is recognised and dropped.

use log::{debug, info, warn};

use crate::config::{PollConfig, SoundCalibration};
use crate::display::DisplayState;
use crate::error::NetworkError;
use crate::status;

use super::context::{ConnectionState, PollContext};
use super::events::LinkEvent;
use super::ports::DisplaySink;

// ───────────────────────────────────────────────────────────────
// Tick plumbing
// ───────────────────────────────────────────────────────────────

/// Identifies one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    tick: u64,
}

impl FetchTicket {
    pub fn epoch(self) -> u64 {
        self.epoch
    }
}

/// What the driver must do after [`PollSession::on_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Nothing to fetch; wait one interval.
    Skip,
    /// Issue one status request and report back with this ticket.
    Fetch(FetchTicket),
}

/// How a settled fetch was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Decoded and displayed.
    Live,
    /// Body did not decode; error counter untouched.
    DataError,
    /// Network failure below the threshold.
    Retrying { attempt: u32 },
    /// Network failure at or past the threshold; display reset.
    Degraded { failures: u32 },
    /// Result discarded: session stopped/restarted or the link dropped
    /// while the request was in flight.
    Stale,
}

// ───────────────────────────────────────────────────────────────
// PollSession
// ───────────────────────────────────────────────────────────────

/// The poll-loop state machine.
pub struct PollSession {
    ctx: PollContext,
    /// Bumped on every start/stop; tickets from older epochs are stale.
    epoch: u64,
    in_flight: Option<FetchTicket>,
    error_threshold: u32,
    calibration: SoundCalibration,
    target_ssid: String,
}

impl PollSession {
    /// Construct an idle session.  Call [`start`](Self::start) next.
    pub fn new(config: &PollConfig) -> Self {
        Self {
            ctx: PollContext::default(),
            epoch: 0,
            in_flight: None,
            error_threshold: config.error_threshold,
            calibration: config.sound_calibration,
            target_ssid: config.target_ssid.as_str().to_owned(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin a fresh session, discarding any previous one.
    /// Returns the new epoch.
    pub fn start(&mut self) -> u64 {
        if self.ctx.polling_active {
            info!("PollSession restarted (epoch {})", self.epoch + 1);
        } else {
            info!("PollSession started (epoch {})", self.epoch + 1);
        }
        self.epoch += 1;
        self.ctx = PollContext::started();
        self.in_flight = None;
        self.epoch
    }

    /// End the session.  Any in-flight completion becomes a no-op.
    pub fn stop(&mut self) {
        if !self.ctx.polling_active {
            return;
        }
        self.epoch += 1;
        self.ctx.polling_active = false;
        self.in_flight = None;
        info!(
            "PollSession stopped after {} ticks (epoch {})",
            self.ctx.ticks, self.epoch
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run the synchronous half of a tick: evaluate connectivity and decide
    /// whether to fetch.
    pub fn on_tick(&mut self, connected: bool, sink: &mut impl DisplaySink) -> TickAction {
        if !self.ctx.polling_active {
            return TickAction::Skip;
        }
        if let Some(pending) = self.in_flight {
            warn!(
                "Tick {} skipped: fetch from tick {} still pending",
                self.ctx.ticks + 1,
                pending.tick
            );
            return TickAction::Skip;
        }
        self.ctx.ticks += 1;

        let transitioned = self.observe_connectivity(connected, sink);
        if !connected {
            // A fresh disconnect already emitted its reset.
            if !transitioned {
                sink.on_display_state(&DisplayState::reset());
            }
            debug!(
                "Tick {}: not on {}, fetch skipped",
                self.ctx.ticks, self.target_ssid
            );
            return TickAction::Skip;
        }

        let ticket = FetchTicket {
            epoch: self.epoch,
            tick: self.ctx.ticks,
        };
        self.in_flight = Some(ticket);
        TickAction::Fetch(ticket)
    }

    /// Apply a settled fetch.  `connected_now` is a fresh probe result taken
    /// after the request settled.
    pub fn on_fetch_complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<u8>, NetworkError>,
        connected_now: bool,
        sink: &mut impl DisplaySink,
    ) -> Completion {
        if !self.is_current(ticket.epoch) || self.in_flight != Some(ticket) {
            debug!("Dropping completion for tick {} (epoch {})", ticket.tick, ticket.epoch);
            return Completion::Stale;
        }
        self.in_flight = None;

        self.observe_connectivity(connected_now, sink);
        if !self.ctx.connection.is_connected() {
            info!("Tick {}: link dropped mid-fetch, result discarded", ticket.tick);
            return Completion::Stale;
        }

        match result {
            Err(e) => self.apply_network_error(e, sink),
            Ok(body) => self.apply_body(&body, sink),
        }
    }

    /// Record a connectivity observation, emitting one-shot transition
    /// events.  Returns `true` if the state changed.
    pub fn observe_connectivity(&mut self, connected: bool, sink: &mut impl DisplaySink) -> bool {
        let next = ConnectionState::from_probe(connected);
        let prev = self.ctx.connection;
        if next == prev {
            return false;
        }
        self.ctx.connection = next;

        match next {
            ConnectionState::Connected => {
                info!("Joined {}", self.target_ssid);
                self.ctx.consecutive_errors = 0;
                sink.on_event(&LinkEvent::Connected {
                    ssid: self.target_ssid.clone(),
                });
            }
            ConnectionState::Disconnected => {
                info!("Left {}", self.target_ssid);
                sink.on_event(&LinkEvent::Disconnected);
                sink.on_display_state(&DisplayState::reset());
            }
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether `epoch` names the running session.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.ctx.polling_active && epoch == self.epoch
    }

    pub fn is_active(&self) -> bool {
        self.ctx.polling_active
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn has_fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Read-only view of the poll state.
    pub fn context(&self) -> &PollContext {
        &self.ctx
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_network_error(
        &mut self,
        err: NetworkError,
        sink: &mut impl DisplaySink,
    ) -> Completion {
        let failures = self.ctx.consecutive_errors.saturating_add(1);
        self.ctx.consecutive_errors = failures;
        warn!("Status fetch failed ({}/{}): {}", failures, self.error_threshold, err);

        if failures < self.error_threshold {
            sink.on_display_state(&DisplayState::retrying(failures));
            return Completion::Retrying { attempt: failures };
        }

        sink.on_display_state(&DisplayState::reset());
        if failures == self.error_threshold {
            warn!("{} consecutive failures, reporting connection issues", failures);
            sink.on_event(&LinkEvent::ConnectionIssues { failures });
        }
        Completion::Degraded { failures }
    }

    fn apply_body(&mut self, body: &[u8], sink: &mut impl DisplaySink) -> Completion {
        let status = match status::decode(body) {
            Ok(s) => s,
            Err(e) => {
                warn!("Status payload rejected: {}", e);
                sink.on_display_state(&DisplayState::data_error());
                return Completion::DataError;
            }
        };

        self.ctx.consecutive_errors = 0;
        // Quiet readings leave the last level alone, so dipping below 2
        // and returning to the same level does not buzz again.
        if status.level != self.ctx.last_sound_level && status.level >= 2 {
            sink.on_event(&LinkEvent::Haptic {
                level: status.level,
            });
            self.ctx.last_sound_level = status.level;
        }

        debug!(
            "Status: avg={} level={} state={} distance={} uptime={}ms mqtt={} stations={}",
            status.avg,
            status.level,
            status.state,
            status.distance,
            status.uptime,
            status.mqtt_connected,
            status.connected_stations,
        );
        sink.on_display_state(&DisplayState::live(&status, &self.calibration));
        Completion::Live
    }
}
