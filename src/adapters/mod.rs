//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                       |
//! |-------------|----------------|-----------------------------------|
//! | `http`      | HttpTransport  | `reqwest` blocking client (host)  |
//! | `log_sink`  | DisplaySink    | `log` facade                      |
//! | `ssid`      | SsidSource     | `iwgetid` / fixed association     |

#[cfg(feature = "host")]
pub mod http;
pub mod log_sink;
pub mod ssid;
pub(crate) mod utils;
