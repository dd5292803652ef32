//! Error types for the SoundBot link core.
//!
//! Each failure class the poll loop can observe gets its own enum so the
//! controller can recover from it the right way: network failures feed the
//! consecutive-error counter, decode failures only change what is shown.
//! None of them is ever fatal to the loop.

use core::fmt;

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

/// A status fetch that did not produce a usable body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// The request did not settle within the configured deadline.
    Timeout,
    /// Connection refused, host unreachable, or DNS failure.
    ConnectFailed,
    /// The device answered with a non-success HTTP status.
    HttpStatus(u16),
    /// The device answered 2xx with no body.
    EmptyBody,
    /// Any other transport failure (worker spawn, body read, protocol).
    Transport,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::ConnectFailed => write!(f, "connection failed"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::EmptyBody => write!(f, "empty response body"),
            Self::Transport => write!(f, "transport error"),
        }
    }
}

impl std::error::Error for NetworkError {}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// The device answered, but the payload is not a valid status document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not JSON at all, or truncated.
    Syntax { line: usize, column: usize },
    /// A required field is absent.
    MissingField(String),
    /// A field is present but has the wrong type or range.
    InvalidField { detail: String, line: usize, column: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { line, column } => {
                write!(f, "malformed JSON at {line}:{column}")
            }
            Self::MissingField(name) => write!(f, "missing field `{name}`"),
            Self::InvalidField {
                detail,
                line,
                column,
            } => write!(f, "invalid field at {line}:{column}: {detail}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let (line, column) = (e.line(), e.column());
        match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax { line, column },
            Category::Data => {
                let detail = e.to_string();
                match missing_field_name(&detail) {
                    Some(name) => Self::MissingField(name.to_owned()),
                    None => Self::InvalidField {
                        detail,
                        line,
                        column,
                    },
                }
            }
        }
    }
}

/// serde reports absent fields as "missing field `name` at line L column C".
fn missing_field_name(detail: &str) -> Option<&str> {
    let rest = detail.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`PollConfig`](crate::config::PollConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The config document could not be parsed.
    Parse(serde_json::Error),
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::ValidationFailed(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Probe errors
// ---------------------------------------------------------------------------

/// The host could not report its current wireless association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The host query could not be run (missing tool, permission denied).
    Unavailable(String),
    /// The host query ran but reported failure.
    QueryFailed(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "network query unavailable: {msg}"),
            Self::QueryFailed(msg) => write!(f, "network query failed: {msg}"),
        }
    }
}

impl std::error::Error for ProbeError {}
