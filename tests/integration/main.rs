//! Integration tests for the SoundBot polling core.
//!
//! Exercises the poll session, connectivity probe and polling controller
//! together through mock port adapters, without any network or Wi-Fi.

mod controller_tests;
mod mock_ports;
