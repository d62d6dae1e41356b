//! Progress reporting capability handed to the scan engine.
//!
//! The engine never prints on its own. It formats free-text progress lines and
//! hands them to whatever [`LogSink`] the caller put into the
//! [`ScanConfig`](crate::config::ScanConfig).

use chrono::Local;
use tracing::info;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `tracing` target used by [`TracingSink`].
pub const PROGRESS_TARGET: &str = "portsweep::progress";

/// Local wall-clock time in the format used by progress lines and reports.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Discards every line. The default for library use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// Forwards every line to `tracing` at `INFO` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        info!(target: PROGRESS_TARGET, "{line}");
    }
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
