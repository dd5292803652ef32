//! Blocking-HTTP transport adapter.
//!
//! Implements [`HttpTransport`] with a `reqwest` blocking client.  The
//! request runs on a short-lived worker thread so the executor thread never
//! blocks; the worker hands its result back through an `embassy-sync`
//! [`Signal`] that the poll task awaits.
//!
//! ```text
//! ┌──────────────┐  spawn   ┌───────────────┐
//! │  Poll task   │────────▶│ fetch worker   │  reqwest::blocking GET
//! │  (executor)  │◀────────│ (std thread)   │
//! └──────────────┘  Signal  └───────────────┘
//! ```
//!
//! If the poll task is cancelled mid-request the worker still finishes,
//! signals into a `Signal` nobody awaits, and exits.

use core::future::Future;
use core::time::Duration;
use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::warn;

use crate::app::ports::HttpTransport;
use crate::error::NetworkError;

type FetchSignal = Signal<CriticalSectionRawMutex, Result<Vec<u8>, NetworkError>>;

/// `reqwest`-backed transport for plain-HTTP device endpoints.
#[derive(Clone)]
pub struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    /// Build a client whose own deadline matches the poll loop's, so
    /// abandoned workers do not linger past it.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for BlockingHttpTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, NetworkError>> {
        let signal: Arc<FetchSignal> = Arc::new(Signal::new());
        let done = Arc::clone(&signal);
        let client = self.client.clone();
        let url = url.to_owned();

        let spawned = std::thread::Builder::new()
            .name("status-fetch".into())
            .spawn(move || done.signal(blocking_get(&client, &url)));

        async move {
            if let Err(e) = spawned {
                warn!("HTTP: failed to spawn fetch worker: {}", e);
                return Err(NetworkError::Transport);
            }
            signal.wait().await
        }
    }
}

fn blocking_get(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, NetworkError> {
    let response = client.get(url).send().map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP: {} answered {}", url, status);
        return Err(NetworkError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().map_err(classify)?;
    Ok(body.to_vec())
}

/// Collapse `reqwest`'s error into the poll loop's taxonomy.
fn classify(e: reqwest::Error) -> NetworkError {
    warn!("HTTP: request failed: {}", e);
    if e.is_timeout() {
        NetworkError::Timeout
    } else if e.is_connect() {
        NetworkError::ConnectFailed
    } else {
        NetworkError::Transport
    }
}
