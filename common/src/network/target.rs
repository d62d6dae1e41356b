//! # Host Expressions
//!
//! A host expression names the hosts to scan:
//! * A single name or address (`scanme.example`, `192.168.1.5`).
//! * A last-octet range (`192.168.1.5-40`), where the part after the dash is
//!   the final value of the fourth octet of the resolved start address.
//!
//! Parsing here is purely lexical. Name resolution happens once, in the core.

use std::fmt;

/// A host expression split into the part to resolve and the optional range end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostExpr<'a> {
    /// Name or address handed to the resolver.
    pub name: &'a str,
    /// Raw text after the first `-`, if any. Interpreted by
    /// [`last_octet_range`](crate::network::range::last_octet_range).
    pub range_end: Option<&'a str>,
}

impl<'a> HostExpr<'a> {
    /// Splits on the first `-` only. Anything after it belongs to the range end.
    pub fn parse(expr: &'a str) -> Self {
        match expr.split_once('-') {
            Some((name, end)) => Self {
                name,
                range_end: Some(end),
            },
            None => Self {
                name: expr,
                range_end: None,
            },
        }
    }

    pub fn is_range(&self) -> bool {
        self.range_end.is_some()
    }
}

impl fmt::Display for HostExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range_end {
            Some(end) => write!(f, "{}-{}", self.name, end),
            None => f.write_str(self.name),
        }
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
