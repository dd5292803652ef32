//! Raw device codes → display categories.
//!
//! Thresholds and labels here are what users see; they must not drift.

use crate::config::SoundCalibration;
use crate::display::Rgb;

// ---------------------------------------------------------------------------
// Sound
// ---------------------------------------------------------------------------

/// Loudness band reported by the device's `level` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundLevel {
    VeryQuiet,
    Moderate,
    Loud,
    /// Level 4 and every out-of-range code.
    VeryLoud,
}

impl SoundLevel {
    pub fn from_code(level: i64) -> Self {
        match level {
            1 => Self::VeryQuiet,
            2 => Self::Moderate,
            3 => Self::Loud,
            _ => Self::VeryLoud,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryQuiet => "Very Quiet",
            Self::Moderate => "Moderate",
            Self::Loud => "Loud",
            Self::VeryLoud => "Very Loud",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::VeryQuiet => Rgb::GREEN,
            Self::Moderate => Rgb::YELLOW,
            Self::Loud => Rgb::ORANGE,
            Self::VeryLoud => Rgb::RED,
        }
    }
}

/// Convert the raw accumulator to dB, rounded to two decimals.
/// Negative readings (sensor settling) display as zero.
pub fn sound_db(avg: f64, cal: &SoundCalibration) -> f64 {
    if avg >= 0.0 {
        ((avg * cal.scale + cal.offset_db) * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Render a dB value the way the app always has: shortest decimal form,
/// but never without a fractional digit (`55.0 dB`, `55.25 dB`).
pub fn format_db(db: f64) -> String {
    if db.fract() == 0.0 {
        format!("{db:.1} dB")
    } else {
        format!("{db} dB")
    }
}

// ---------------------------------------------------------------------------
// Robot motion
// ---------------------------------------------------------------------------

/// What the robot's drive controller is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotMotion {
    Forward,
    TurningLeft,
    BackingUp,
    TurningRight,
    Stopped,
    Unknown,
}

impl RobotMotion {
    pub fn from_code(state: i64) -> Self {
        match state {
            0 => Self::Forward,
            1 => Self::TurningLeft,
            2 => Self::BackingUp,
            3 => Self::TurningRight,
            4 => Self::Stopped,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "Moving Forward",
            Self::TurningLeft => "Turning Left",
            Self::BackingUp => "Backing Up",
            Self::TurningRight => "Turning Right",
            Self::Stopped => "Stopped",
            Self::Unknown => "Unknown State",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Forward => Rgb::GREEN,
            Self::TurningLeft | Self::TurningRight => Rgb::BLUE,
            Self::BackingUp => Rgb::ORANGE,
            Self::Stopped => Rgb::RED,
            Self::Unknown => Rgb::GRAY,
        }
    }
}

// ---------------------------------------------------------------------------
// Obstacle distance
// ---------------------------------------------------------------------------

/// Ultrasonic readings at or above this are the firmware's "nothing there".
pub const CLEAR_DISTANCE_CM: i64 = 999;

/// Readings at or below this are close enough to warn about.
pub const NEAR_DISTANCE_CM: i64 = 50;

/// Obstacle proximity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceBand {
    Clear,
    Far(i64),
    Near(i64),
}

impl DistanceBand {
    pub fn from_cm(distance: i64) -> Self {
        if distance >= CLEAR_DISTANCE_CM {
            Self::Clear
        } else if distance > NEAR_DISTANCE_CM {
            Self::Far(distance)
        } else {
            Self::Near(distance)
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Clear => "Clear".to_owned(),
            Self::Far(cm) | Self::Near(cm) => format!("{cm} cm"),
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Clear => Rgb::GREEN,
            Self::Far(_) => Rgb::YELLOW,
            Self::Near(_) => Rgb::RED,
        }
    }
}

// ---------------------------------------------------------------------------
// Messaging link
// ---------------------------------------------------------------------------

/// State of the device's MQTT uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    Connected,
    Disconnected,
}

impl LinkState {
    pub fn from_flag(mqtt_connected: bool) -> Self {
        if mqtt_connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Connected => Rgb::GREEN,
            Self::Disconnected => Rgb::RED,
        }
    }
}
