//! # Port Specifications
//!
//! Turns user input such as `22,80,8000-8100` into a concrete set of ports.
//!
//! Bad tokens never abort parsing. Each one is reported through `tracing` and
//! skipped, so `0,70000,22` still yields `[22]`. Only an empty specification is
//! an error.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{PortRangeError, PortSpecError};

pub const MIN_PORT: i64 = 1;
pub const MAX_PORT: i64 = u16::MAX as i64;

/// Parses a port specification into deduplicated ports, in ascending order.
///
/// Each comma-separated token is either `N` or `A-B`. For a range, an invalid
/// start skips the whole token while an invalid end keeps the start. `A-B`
/// with `B <= A` contributes only `A`.
pub fn parse_port_spec(spec: &str) -> Result<Vec<u16>, PortSpecError> {
    if spec.trim().is_empty() {
        return Err(PortSpecError::Empty);
    }

    let mut ports: BTreeSet<u16> = BTreeSet::new();

    for token in spec.trim_matches(',').split(',') {
        let mut bounds = token.trim().trim_matches('-').split('-');
        let first: &str = bounds.next().unwrap_or_default();

        let start: u16 = match parse_port(first) {
            Ok(port) => port,
            Err(e) => {
                warn!("Skipping port token '{token}': {e}");
                continue;
            }
        };
        ports.insert(start);

        let Some(second) = bounds.next() else {
            continue;
        };

        match parse_port(second) {
            Ok(end) if end > start => ports.extend(start..=end),
            Ok(_) => {}
            Err(e) => warn!("Range '{token}' has an invalid end, keeping {start} only: {e}"),
        }
    }

    Ok(ports.into_iter().collect())
}

/// Parses one port number and checks it lies in `1..=65535`.
pub fn parse_port(token: &str) -> Result<u16, PortRangeError> {
    let value: i64 = token
        .parse()
        .map_err(|_| PortRangeError::NotANumber(token.to_string()))?;

    if !(MIN_PORT..=MAX_PORT).contains(&value) {
        return Err(PortRangeError::OutOfRange(value));
    }

    u16::try_from(value).map_err(|_| PortRangeError::OutOfRange(value))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
