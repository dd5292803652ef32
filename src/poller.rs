//! Polling controller — the async driver around [`PollSession`].
//!
//! Runs as a single task on an `edge-executor` [`LocalExecutor`] with
//! `async-io-mini` reactor timers for the tick interval and the request
//! deadline.  All session mutation and every sink call happen on that one
//! task, so the poll state needs no locking.
//!
//! ```text
//!  ┌────────────────────────────────────────────────────────────┐
//!  │  Executor thread                                           │
//!  │  ┌──────────────────────────────────────────────────────┐  │
//!  │  │  poll task (one per start())                         │  │
//!  │  │                                                      │  │
//!  │  │   probe ─▶ on_tick ─▶ fetch.await ─▶ probe ─▶        │  │
//!  │  │   on_fetch_complete ─▶ Timer(interval).await ─▶ …    │  │
//!  │  └──────────────────────────────────────────────────────┘  │
//!  └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The next tick is scheduled only after the previous fetch settles, so
//! there is never more than one request in flight and results are applied
//! in tick order.  `stop()` drops the task (cancelling the timer and any
//! pending fetch future) and bumps the session epoch, so a completion that
//! still slips through is ignored.

use core::cell::RefCell;
use core::time::Duration;
use std::rc::Rc;

use edge_executor::{LocalExecutor, Task};
use log::info;

use crate::app::context::PollContext;
use crate::app::ports::{DisplaySink, HttpTransport, SsidSource};
use crate::app::service::{PollSession, TickAction};
use crate::client::StatusClient;
use crate::config::PollConfig;
use crate::error::ConfigError;
use crate::probe::ConnectivityProbe;

// ── Shared loop state ────────────────────────────────────────

struct Shared<S, T, D> {
    probe: ConnectivityProbe<S>,
    client: StatusClient<T>,
    session: RefCell<PollSession>,
    sink: RefCell<D>,
    interval: Duration,
}

impl<S: SsidSource, T: HttpTransport, D: DisplaySink> Shared<S, T, D> {
    /// One full tick.  No `RefCell` borrow is held across the fetch await.
    async fn run_tick(&self) {
        let connected = self.probe.is_target_network_active();
        let action = {
            let mut sink = self.sink.borrow_mut();
            self.session.borrow_mut().on_tick(connected, &mut *sink)
        };

        let TickAction::Fetch(ticket) = action else {
            return;
        };

        let result = self.client.fetch_status().await;

        // Stale-response guard: re-probe before anything reaches the UI.
        let connected_now = self.probe.is_target_network_active();
        let mut sink = self.sink.borrow_mut();
        self.session
            .borrow_mut()
            .on_fetch_complete(ticket, result, connected_now, &mut *sink);
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.session.borrow().is_current(epoch)
    }
}

/// The poll task body.  Exits on its own once the epoch is superseded.
async fn poll_loop<S, T, D>(shared: Rc<Shared<S, T, D>>, epoch: u64)
where
    S: SsidSource,
    T: HttpTransport,
    D: DisplaySink,
{
    while shared.is_current(epoch) {
        shared.run_tick().await;
        if !shared.is_current(epoch) {
            break;
        }
        async_io_mini::Timer::after(shared.interval).await;
    }
}

// ── Controller ───────────────────────────────────────────────

/// Owns the session, the adapters, and at most one running poll task.
pub struct PollingController<S, T, D> {
    shared: Rc<Shared<S, T, D>>,
    task: Option<Task<()>>,
}

impl<S, T, D> PollingController<S, T, D>
where
    S: SsidSource,
    T: HttpTransport,
    D: DisplaySink,
{
    /// Validate `config` and wire the adapters.  Does **not** start
    /// polling; call [`start`](Self::start) next.
    pub fn new(config: &PollConfig, ssid: S, transport: T, sink: D) -> Result<Self, ConfigError> {
        config.validate()?;

        let shared = Shared {
            probe: ConnectivityProbe::new(ssid, &config.target_ssid),
            client: StatusClient::new(
                transport,
                &config.status_url,
                Duration::from_millis(u64::from(config.request_timeout_ms)),
            ),
            session: RefCell::new(PollSession::new(config)),
            sink: RefCell::new(sink),
            interval: Duration::from_millis(u64::from(config.poll_interval_ms)),
        };

        Ok(Self {
            shared: Rc::new(shared),
            task: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start polling on `executor`.  If already polling, the running task
    /// is cancelled and replaced; there is never more than one.
    pub fn start<'a, const C: usize>(&mut self, executor: &LocalExecutor<'a, C>)
    where
        S: 'a,
        T: 'a,
        D: 'a,
    {
        // Dropping the task cancels it before the new epoch begins.
        self.task = None;
        let epoch = self.shared.session.borrow_mut().start();
        let task = executor.spawn(poll_loop(Rc::clone(&self.shared), epoch));
        self.task = Some(task);
        info!(
            "Polling {} every {:?} while on {}",
            self.shared.client.url(),
            self.shared.interval,
            self.shared.probe.target()
        );
    }

    /// Stop polling.  Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.shared.session.borrow_mut().stop();
        self.task = None;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_polling(&self) -> bool {
        self.task.is_some() && self.shared.session.borrow().is_active()
    }

    /// Snapshot of the current poll state.
    pub fn context(&self) -> PollContext {
        self.shared.session.borrow().context().clone()
    }

    /// Inspect the sink (e.g. to read what a recording sink captured).
    pub fn with_sink<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.shared.sink.borrow())
    }
}
