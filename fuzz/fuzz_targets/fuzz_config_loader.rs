//! Fuzz target: `PollConfig::from_json`
//!
//! Arbitrary UTF-8 as a config file.  Loading must never panic, and a
//! config that loads must also pass validation.
//!
//! cargo fuzz run fuzz_config_loader

#![no_main]

use libfuzzer_sys::fuzz_target;
use soundbot_link::config::PollConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = PollConfig::from_json(text) {
        assert!(config.validate().is_ok());
    }
});
