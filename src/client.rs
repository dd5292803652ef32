//! Status client.
//!
//! Wraps an [`HttpTransport`] with the policy the poll loop relies on:
//! one GET per call, no retries, an explicit deadline, and an empty body
//! treated as a network failure rather than a decode failure.

use core::time::Duration;

use futures_lite::future;
use log::debug;

use crate::app::ports::HttpTransport;
use crate::error::NetworkError;

/// Deadline-bounded fetcher for the device status endpoint.
pub struct StatusClient<T> {
    transport: T,
    url: String,
    timeout: Duration,
}

impl<T: HttpTransport> StatusClient<T> {
    pub fn new(transport: T, url: &str, timeout: Duration) -> Self {
        Self {
            transport,
            url: url.to_owned(),
            timeout,
        }
    }

    /// Issue a single GET and wait for it to settle or time out.
    ///
    /// The deadline runs on the `async-io-mini` reactor, so it fires even
    /// if the transport never completes its future.
    pub async fn fetch_status(&self) -> Result<Vec<u8>, NetworkError> {
        debug!("GET {}", self.url);
        let request = self.transport.get(&self.url);
        let deadline = async {
            async_io_mini::Timer::after(self.timeout).await;
            Err::<Vec<u8>, _>(NetworkError::Timeout)
        };

        let body = future::or(request, deadline).await?;
        if body.is_empty() {
            return Err(NetworkError::EmptyBody);
        }
        debug!("{} bytes from {}", body.len(), self.url);
        Ok(body)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
