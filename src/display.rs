//! Render-ready display snapshots.
//!
//! A [`DisplayState`] is everything the UI layer needs to paint the status
//! screen, already classified and formatted.  The polling core is the only
//! producer; sinks receive them by reference and never mutate them.

use serde::Serialize;

use crate::config::SoundCalibration;
use crate::status::RawStatus;
use crate::status::classify::{
    DistanceBand, LinkState, RobotMotion, SoundLevel, format_db, sound_db,
};
use crate::status::uptime::format_uptime;

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// 8-bit RGB text/background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const ORANGE: Self = Self::new(255, 165, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const GRAY: Self = Self::new(136, 136, 136);
    /// Used for the parse-error text.
    pub const DARK_BLUE: Self = Self::new(0, 0, 139);
    /// Idle "Connect" button background.
    pub const PURPLE: Self = Self::new(0xBB, 0x86, 0xFC);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text plus the colour it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: String,
    pub color: Rgb,
}

impl Label {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    fn placeholder() -> Self {
        Self::new(PLACEHOLDER, Rgb::GRAY)
    }
}

const PLACEHOLDER: &str = "-";
const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// DisplayState
// ---------------------------------------------------------------------------

/// Which situation a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayKind {
    /// Fresh data from the device.
    Live,
    /// A fetch failed; `attempt` consecutive failures so far.
    Retrying { attempt: u32 },
    /// The device answered with something that is not a status document.
    DataError,
    /// Not on the device AP, or the link is considered unhealthy.
    Reset,
}

/// Immutable snapshot consumed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub kind: DisplayKind,
    pub sound_text: String,
    pub sound_level: Label,
    pub robot_state: Label,
    pub distance: Label,
    pub link_status: Label,
    pub uptime: String,
    pub connection_button: Label,
}

impl DisplayState {
    /// Full snapshot derived from a decoded status.
    pub fn live(status: &RawStatus, cal: &SoundCalibration) -> Self {
        let level = SoundLevel::from_code(status.level);
        let motion = RobotMotion::from_code(status.state);
        let distance = DistanceBand::from_cm(status.distance);
        let link = LinkState::from_flag(status.mqtt_connected);

        Self {
            kind: DisplayKind::Live,
            sound_text: format_db(sound_db(status.avg, cal)),
            sound_level: Label::new(level.label(), level.color()),
            robot_state: Label::new(motion.label(), motion.color()),
            distance: Label::new(distance.label(), distance.color()),
            link_status: Label::new(link.label(), link.color()),
            uptime: format_uptime(status.uptime),
            connection_button: connected_button(),
        }
    }

    /// Everything blanked; the button offers to connect.
    pub fn reset() -> Self {
        Self {
            kind: DisplayKind::Reset,
            sound_text: NOT_AVAILABLE.to_owned(),
            sound_level: Label::placeholder(),
            robot_state: Label::placeholder(),
            distance: Label::placeholder(),
            link_status: Label::placeholder(),
            uptime: PLACEHOLDER.to_owned(),
            connection_button: Label::new("Connect", Rgb::PURPLE),
        }
    }

    /// Transient fetch failure while still on the device AP.
    pub fn retrying(attempt: u32) -> Self {
        Self {
            kind: DisplayKind::Retrying { attempt },
            sound_text: "Retrying…".to_owned(),
            sound_level: Label::new("Retrying…", Rgb::GRAY),
            connection_button: connected_button(),
            ..Self::reset()
        }
    }

    /// The device answered but the payload did not decode.
    pub fn data_error() -> Self {
        Self {
            kind: DisplayKind::DataError,
            sound_text: "Parse Error".to_owned(),
            sound_level: Label::new("Parse Error", Rgb::DARK_BLUE),
            connection_button: connected_button(),
            ..Self::reset()
        }
    }

    pub fn is_reset(&self) -> bool {
        self.kind == DisplayKind::Reset
    }
}

fn connected_button() -> Label {
    Label::new("Connected", Rgb::RED)
}
