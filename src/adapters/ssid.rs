//! Host SSID query adapters.
//!
//! Implement [`SsidSource`], the boundary between the connectivity probe
//! and whatever the host offers for "which Wi-Fi am I on".
//!
//! - [`CommandSsidSource`]: runs a host tool (default `iwgetid -r`) and
//!   reads the SSID from its stdout.
//! - [`FixedSsidSource`]: reports a fixed association; for desktop runs
//!   against a device reachable without Wi-Fi, and for tests.

use std::process::Command;

use log::debug;

use crate::app::ports::SsidSource;
use crate::error::ProbeError;

// ───────────────────────────────────────────────────────────────
// Command-backed source
// ───────────────────────────────────────────────────────────────

/// Runs an external command per query and treats its trimmed stdout as
/// the SSID.
///
/// Empty output or a non-zero exit with empty output means "not
/// associated" (`iwgetid` exits 255 when no wireless link is up).
pub struct CommandSsidSource {
    program: String,
    args: Vec<String>,
}

impl CommandSsidSource {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    /// `iwgetid -r` (Linux wireless-tools, prints the bare SSID).
    pub fn iwgetid() -> Self {
        Self::new("iwgetid", &["-r"])
    }
}

impl Default for CommandSsidSource {
    fn default() -> Self {
        Self::iwgetid()
    }
}

impl SsidSource for CommandSsidSource {
    fn current_ssid(&self) -> Result<Option<String>, ProbeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| ProbeError::Unavailable(format!("{}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let ssid = stdout.trim();

        if ssid.is_empty() {
            if output.status.success() {
                return Ok(None);
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                debug!("{} exited {} with no output: not associated", self.program, output.status);
                return Ok(None);
            }
            return Err(ProbeError::QueryFailed(format!(
                "{} exited {}: {}",
                self.program, output.status, stderr
            )));
        }
        Ok(Some(ssid.to_owned()))
    }
}

// ───────────────────────────────────────────────────────────────
// Fixed source
// ───────────────────────────────────────────────────────────────

/// Always reports the same association.
#[derive(Debug, Clone, Default)]
pub struct FixedSsidSource {
    ssid: Option<String>,
}

impl FixedSsidSource {
    pub fn associated(ssid: &str) -> Self {
        Self {
            ssid: Some(ssid.to_owned()),
        }
    }

    pub fn unassociated() -> Self {
        Self { ssid: None }
    }
}

impl SsidSource for FixedSsidSource {
    fn current_ssid(&self) -> Result<Option<String>, ProbeError> {
        Ok(self.ssid.clone())
    }
}
