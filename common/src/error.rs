//! # Input Error Taxonomy
//!
//! Errors raised while turning user input into something scannable.
//!
//! [`TargetError`] and [`PortSpecError`] are fatal: the scan never starts.
//! [`PortRangeError`] is recoverable: the offending token is logged and skipped.

use thiserror::Error;

/// The host expression could not be turned into IPv4 addresses.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to resolve '{token}': {source}")]
    Resolution {
        token: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{token}' resolved to '{resolved}', which is not a valid IPv4 address")]
    InvalidAddress { token: String, resolved: String },
}

/// The port specification as a whole is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("no ports were specified")]
    Empty,
}

/// A single token of a port specification is not a valid port.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortRangeError {
    #[error("'{0}' is not a port number")]
    NotANumber(String),

    #[error("port {0} is outside the range 1-65535")]
    OutOfRange(i64),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
