//! SoundBot link library.
//!
//! The connectivity-gated status polling core of the SoundBot companion
//! app: probe the access point, fetch `/status`, classify it, and push
//! render-ready snapshots to the UI.  Host I/O is reached only through the
//! port traits in [`app::ports`]; concrete host adapters live in
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod poller;
pub mod probe;
pub mod status;
