//! Application core — the poll-loop state machine, zero I/O.
//!
//! This module contains the rules for turning probe results and fetch
//! outcomes into display snapshots and one-shot notifications.  All
//! interaction with the host happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a network.

pub mod context;
pub mod events;
pub mod ports;
pub mod service;
