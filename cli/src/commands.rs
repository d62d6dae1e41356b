pub mod scan;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use portsweep_common::config::{DEFAULT_MAX_CONCURRENCY, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version, about = "A concurrent TCP connect port scanner.")]
pub struct CommandLine {
    /// Host to scan: an IP, a domain name, or a last-octet range like 192.168.1.1-254
    #[arg(short, long, default_value = "127.0.0.1")]
    pub ip: String,

    /// Ports to scan, e.g. 22,80,8000-8100
    #[arg(short, long, default_value = "80-1000")]
    pub ports: String,

    /// Directory the result file is written to
    #[arg(long, default_value = "log")]
    pub path: PathBuf,

    /// Probe timeout in milliseconds
    #[arg(short, long, default_value_t = 200)]
    pub timeout: u64,

    /// Maximum number of concurrent workers per host
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: NonZeroUsize,

    /// Hide progress output, keep warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(Duration::from_millis(self.timeout), self.concurrency)
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
