//! Deterministic stand-ins for the network, shared by the scanner tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use portsweep_common::sink::LogSink;

use super::resolver::NameResolver;
use crate::network::tcp::{ProbeError, Prober};

pub fn socket(host: Ipv4Addr, port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(host), port)
}

/// Answers from a fixed table and counts every lookup.
pub struct TableResolver {
    table: HashMap<&'static str, Vec<IpAddr>>,
    lookups: AtomicUsize,
}

impl TableResolver {
    pub fn new(entries: &[(&'static str, Vec<IpAddr>)]) -> Self {
        Self {
            table: entries.iter().cloned().collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameResolver for TableResolver {
    async fn lookup(&self, name: &str) -> io::Result<Vec<IpAddr>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "unknown host"))
    }
}

/// Reports a fixed set of sockets as open and records every probe it sees.
#[derive(Default)]
pub struct FixedProber {
    open: HashSet<SocketAddr>,
    probed: Mutex<Vec<SocketAddr>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    delay: Duration,
}

impl FixedProber {
    pub fn new(open: impl IntoIterator<Item = SocketAddr>) -> Self {
        Self {
            open: open.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn all_closed() -> Self {
        Self::default()
    }

    /// Holds every probe for `delay` so concurrent workers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every probed socket, sorted.
    pub fn probed(&self) -> Vec<SocketAddr> {
        let mut probed = self.probed.lock().unwrap().clone();
        probed.sort();
        probed
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FixedProber {
    async fn is_open(&self, addr: SocketAddr, _probe_timeout: Duration) -> Result<bool, ProbeError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.probed.lock().unwrap().push(addr);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(self.open.contains(&addr))
    }
}

/// Claims the socket budget is gone, either for one host or for all of them.
#[derive(Default)]
pub struct ExhaustingProber {
    only_host: Option<Ipv4Addr>,
    probes: AtomicUsize,
}

impl ExhaustingProber {
    pub fn always() -> Self {
        Self::default()
    }

    pub fn on_host(host: Ipv4Addr) -> Self {
        Self {
            only_host: Some(host),
            ..Self::default()
        }
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ExhaustingProber {
    async fn is_open(&self, addr: SocketAddr, _probe_timeout: Duration) -> Result<bool, ProbeError> {
        self.probes.fetch_add(1, Ordering::SeqCst);

        let exhausted = match self.only_host {
            Some(host) => addr.ip() == IpAddr::V4(host),
            None => true,
        };
        if exhausted {
            return Err(ProbeError::ResourceExhausted {
                addr,
                source: io::Error::other("Too many open files"),
            });
        }
        Ok(false)
    }
}

/// A sink that keeps every line it receives.
pub fn collecting_sink() -> (Arc<dyn LogSink>, Arc<Mutex<Vec<String>>>) {
    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let collected = Arc::clone(&lines);
    let sink: Arc<dyn LogSink> =
        Arc::new(move |line: &str| collected.lock().unwrap().push(line.to_string()));
    (sink, lines)
}
