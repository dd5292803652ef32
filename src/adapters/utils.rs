//! Shared validation helpers for the adapter layer.
//!
//! SSIDs arrive from two directions (configuration and host queries) and
//! both paths need the same checks.

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E` (space through tilde, inclusive).
///
/// Used to validate the configured target SSID.
pub(crate) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Strip one pair of surrounding double quotes.
///
/// Android's `WifiInfo.getSSID()` reports UTF-8 SSIDs wrapped in quotes
/// (`"\"SoundBot-AP\""`); `iwgetid` and most desktop tools do not.
pub(crate) fn unquote_ssid(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}
