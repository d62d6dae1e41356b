//! Host expression resolution.
//!
//! Only the start of an expression goes through name resolution, exactly
//! once. Every further host of a range is derived from the resolved start
//! address by stepping its last octet.

use std::io;
use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use tracing::debug;

use portsweep_common::error::TargetError;
use portsweep_common::network::range;
use portsweep_common::network::target::HostExpr;

/// Turns a host name or literal address into IP addresses.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn lookup(&self, name: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolves through the operating system (`getaddrinfo` via tokio).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

#[async_trait]
impl NameResolver for SystemResolver {
    async fn lookup(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((name, 0)).await?;
        Ok(addrs.map(|socket_addr| socket_addr.ip()).collect())
    }
}

/// Expands a host expression into the ordered list of hosts to scan.
///
/// The list always starts with the resolved address. A malformed or
/// descending range end silently yields that address alone.
pub async fn resolve_hosts<R>(resolver: &R, expr: &str) -> Result<Vec<Ipv4Addr>, TargetError>
where
    R: NameResolver + ?Sized,
{
    let target = HostExpr::parse(expr);
    let start = resolve_start(resolver, target.name).await?;

    let hosts: Vec<Ipv4Addr> = range::last_octet_range(start, target.range_end)
        .iter()
        .collect();
    debug!("{target} expanded to {} host(s) starting at {start}", hosts.len());

    Ok(hosts)
}

async fn resolve_start<R>(resolver: &R, name: &str) -> Result<Ipv4Addr, TargetError>
where
    R: NameResolver + ?Sized,
{
    let addrs: Vec<IpAddr> = resolver
        .lookup(name)
        .await
        .map_err(|source| TargetError::Resolution {
            token: name.to_string(),
            source,
        })?;

    if let Some(v4) = addrs.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(*v4),
        IpAddr::V6(_) => None,
    }) {
        return Ok(v4);
    }

    match addrs.first() {
        Some(other) => Err(TargetError::InvalidAddress {
            token: name.to_string(),
            resolved: other.to_string(),
        }),
        None => Err(TargetError::Resolution {
            token: name.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
        }),
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
