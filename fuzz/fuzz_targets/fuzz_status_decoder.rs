//! Fuzz target: `status::decode` + `DisplayState::live`
//!
//! Feeds arbitrary bytes to the status decoder as if the device had sent
//! them.  Decoding must never panic, and any payload that decodes must
//! render to the same snapshot every time.
//!
//! cargo fuzz run fuzz_status_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use soundbot_link::config::SoundCalibration;
use soundbot_link::display::{DisplayKind, DisplayState};
use soundbot_link::status::decode;

fuzz_target!(|data: &[u8]| {
    let Ok(status) = decode(data) else {
        return;
    };

    let cal = SoundCalibration::default();
    let first = DisplayState::live(&status, &cal);
    assert_eq!(first.kind, DisplayKind::Live);
    assert!(first.sound_text.ends_with(" dB"));
    assert_eq!(first, DisplayState::live(&status, &cal));
});
