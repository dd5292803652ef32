//! Mock port adapters for integration tests.
//!
//! Every mock keeps its state behind an `Rc` so a test can hand one clone
//! to the controller and keep another to steer or inspect it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures_lite::future;
use soundbot_link::app::events::LinkEvent;
use soundbot_link::app::ports::{DisplaySink, HttpTransport, SsidSource};
use soundbot_link::display::{DisplayKind, DisplayState};
use soundbot_link::error::{NetworkError, ProbeError};

pub const OK_BODY: &[u8] = br#"{"avg":800,"level":2,"state":0,"distance":30,"ambient":20.1,"uptime":65000,"mqtt_connected":true}"#;

// ── SharedSsid ────────────────────────────────────────────────

/// SSID source the test can re-point at any time.
#[derive(Clone, Default)]
pub struct SharedSsid {
    ssid: Rc<RefCell<Option<String>>>,
    queries: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl SharedSsid {
    pub fn on(ssid: &str) -> Self {
        let s = Self::default();
        s.set(Some(ssid));
        s
    }

    pub fn off() -> Self {
        Self::default()
    }

    pub fn set(&self, ssid: Option<&str>) {
        *self.ssid.borrow_mut() = ssid.map(str::to_owned);
    }

    pub fn queries(&self) -> u32 {
        self.queries.get()
    }
}

impl SsidSource for SharedSsid {
    fn current_ssid(&self) -> Result<Option<String>, ProbeError> {
        self.queries.set(self.queries.get() + 1);
        Ok(self.ssid.borrow().clone())
    }
}

// ── ScriptedTransport ─────────────────────────────────────────

/// What the next GET does.
#[derive(Clone)]
#[allow(dead_code)]
pub enum Reply {
    Body(Vec<u8>),
    Fail(NetworkError),
    /// Never completes (exercises the request deadline).
    Hang,
}

/// Transport that plays back a script, then repeats `fallback`.
#[derive(Clone)]
pub struct ScriptedTransport {
    script: Rc<RefCell<VecDeque<Reply>>>,
    fallback: Reply,
    calls: Rc<Cell<u32>>,
    /// Runs when a request is issued, before it settles.
    on_request: Option<Rc<dyn Fn()>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn always(reply: Reply) -> Self {
        Self {
            script: Rc::new(RefCell::new(VecDeque::new())),
            fallback: reply,
            calls: Rc::new(Cell::new(0)),
            on_request: None,
        }
    }

    pub fn then(self, reply: Reply) -> Self {
        self.script.borrow_mut().push_back(reply);
        self
    }

    pub fn on_request(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_request = Some(Rc::new(hook));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, _url: &str) -> impl Future<Output = Result<Vec<u8>, NetworkError>> {
        self.calls.set(self.calls.get() + 1);
        if let Some(hook) = &self.on_request {
            hook();
        }
        let reply = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        async move {
            match reply {
                Reply::Body(b) => Ok(b),
                Reply::Fail(e) => Err(e),
                Reply::Hang => future::pending().await,
            }
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Records everything the core emits, in order.
#[derive(Default)]
pub struct RecordingSink {
    pub states: Vec<DisplayState>,
    pub events: Vec<LinkEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_state(&self) -> Option<&DisplayState> {
        self.states.last()
    }

    pub fn kinds(&self) -> Vec<DisplayKind> {
        self.states.iter().map(|s| s.kind).collect()
    }

    pub fn count_events(&self, pred: impl Fn(&LinkEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn issues_events(&self) -> usize {
        self.count_events(|e| matches!(e, LinkEvent::ConnectionIssues { .. }))
    }
}

impl DisplaySink for RecordingSink {
    fn on_display_state(&mut self, state: &DisplayState) {
        self.states.push(state.clone());
    }

    fn on_event(&mut self, event: &LinkEvent) {
        self.events.push(event.clone());
    }
}
