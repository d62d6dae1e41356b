use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use crate::sink::{LogSink, NullSink};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(200);
pub const DEFAULT_MAX_CONCURRENCY: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Settings shared read-only by every worker of a scan.
///
/// Built once before the engine starts and never mutated afterwards. Cloning is
/// cheap: the sink is reference counted.
#[derive(Clone)]
pub struct ScanConfig {
    /// Upper bound for a single TCP connect attempt.
    pub probe_timeout: Duration,
    /// Maximum number of workers probing one host at the same time.
    pub max_concurrency: NonZeroUsize,
    /// Receives progress lines; see [`crate::sink`].
    pub log_sink: Arc<dyn LogSink>,
}

impl ScanConfig {
    pub fn new(probe_timeout: Duration, max_concurrency: NonZeroUsize) -> Self {
        Self {
            probe_timeout,
            max_concurrency,
            log_sink: Arc::new(NullSink),
        }
    }

    pub fn with_log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    pub fn log(&self, line: &str) {
        self.log_sink.emit(line);
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT, DEFAULT_MAX_CONCURRENCY)
    }
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("probe_timeout", &self.probe_timeout)
            .field("max_concurrency", &self.max_concurrency)
            .finish_non_exhaustive()
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
