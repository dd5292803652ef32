//! Device uptime formatting.

const MS_PER_SEC: u64 = 1000;
const SECS_PER_MIN: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MIN;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Render milliseconds since boot largest-unit-first, keeping three units
/// at most: `2d 3h 4m`, `3h 4m 5s`, `4m 5s`, `5s`.
pub fn format_uptime(uptime_ms: u64) -> String {
    let total = uptime_ms / MS_PER_SEC;
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MIN;
    let seconds = total % SECS_PER_MIN;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
