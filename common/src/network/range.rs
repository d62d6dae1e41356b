//! # IPv4 Range Model
//!
//! Continuous, inclusive ranges of IPv4 addresses.
//!
//! Host expressions only ever vary the last octet (`10.0.0.5-20`), so a range
//! built by [`last_octet_range`] never crosses a `/24` boundary.

use std::net::Ipv4Addr;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start_addr > self.end_addr
    }
}

/// Builds the range from `start` up to the last octet named by `end_token`.
///
/// The range collapses to `start` alone when the token is missing, is not an
/// unsigned integer, or names an octet below the start's. Octets above 255 are
/// clamped.
pub fn last_octet_range(start: Ipv4Addr, end_token: Option<&str>) -> Ipv4Range {
    let [a, b, c, first] = start.octets();

    let last: u8 = end_token
        .and_then(|token| token.parse::<u64>().ok())
        .filter(|end| *end >= u64::from(first))
        .map(|end| u8::try_from(end).unwrap_or(u8::MAX))
        .unwrap_or(first);

    Ipv4Range::new(start, Ipv4Addr::new(a, b, c, last))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
