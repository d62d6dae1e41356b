//! Splits one host's port list across concurrent workers.
//!
//! The port list is cut into at most `max_concurrency` contiguous shards. Each
//! non-empty shard gets its own tokio task which probes its ports one after the
//! other. Shard results are merged by the caller as the tasks finish, so there
//! is no shared accumulator to lock.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use portsweep_common::config::ScanConfig;
use portsweep_common::sink::timestamp;

use super::ScanError;
use crate::network::tcp::{ProbeError, Prober};

/// One host paired with the full port list of the scan.
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub host: Ipv4Addr,
    pub ports: Arc<[u16]>,
}

impl ScanJob {
    pub fn new(host: Ipv4Addr, ports: Arc<[u16]>) -> Self {
        Self { host, ports }
    }
}

/// Open ports found by one worker.
#[derive(Debug)]
pub struct ShardResult {
    /// Zero-based shard index.
    pub shard: usize,
    pub open_ports: Vec<u16>,
    /// Time since the host scan started, measured when the shard finished.
    pub elapsed: Duration,
}

pub struct WorkDistributor<P> {
    prober: Arc<P>,
    config: ScanConfig,
}

impl<P> WorkDistributor<P>
where
    P: Prober + 'static,
{
    pub fn new(prober: Arc<P>, config: ScanConfig) -> Self {
        Self { prober, config }
    }

    /// Probes every port of `job` and returns the open ones, sorted.
    ///
    /// Returns once every worker has finished. If a worker reports resource
    /// exhaustion the remaining workers are aborted and the error is returned.
    pub async fn scan_host(&self, job: &ScanJob) -> Result<Vec<u16>, ScanError> {
        let total: usize = job.ports.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let shards: Vec<Range<usize>> = shard_bounds(total, self.config.max_concurrency.get());
        let shard_size: usize = shards.first().map_or(0, |bounds| bounds.len());
        self.config.log(&format!(
            "{} [{}] {total} ports to scan, {} workers, {shard_size} ports per worker, timeout {}ms",
            timestamp(),
            job.host,
            shards.len(),
            self.config.probe_timeout.as_millis(),
        ));

        let started: Instant = Instant::now();
        let mut workers: JoinSet<Result<ShardResult, ProbeError>> = JoinSet::new();

        for (shard, bounds) in shards.into_iter().enumerate() {
            if bounds.is_empty() {
                continue;
            }
            let prober = Arc::clone(&self.prober);
            let ports = Arc::clone(&job.ports);
            let host = job.host;
            let probe_timeout = self.config.probe_timeout;

            workers.spawn(async move {
                let open_ports =
                    probe_shard(prober.as_ref(), host, &ports[bounds], probe_timeout).await?;
                Ok(ShardResult {
                    shard,
                    open_ports,
                    elapsed: started.elapsed(),
                })
            });
        }

        let mut open_ports: Vec<u16> = Vec::new();
        while let Some(joined) = workers.join_next().await {
            let result: ShardResult = joined??;
            if !result.open_ports.is_empty() {
                self.config.log(&format!(
                    "{} [{}] worker {} finished in {:.3}s, open ports: {}",
                    timestamp(),
                    job.host,
                    result.shard + 1,
                    result.elapsed.as_secs_f64(),
                    join_ports(&result.open_ports),
                ));
            }
            open_ports.extend(result.open_ports);
        }

        open_ports.sort_unstable();
        self.config.log(&format!(
            "{} [{}] scan finished in {:.3}s, open ports: {}",
            timestamp(),
            job.host,
            started.elapsed().as_secs_f64(),
            join_ports(&open_ports),
        ));

        Ok(open_ports)
    }
}

/// Cuts `len` indices into `min(max_concurrency, len)` contiguous shards.
///
/// Every shard holds `ceil(len / shard_count)` indices except at the tail,
/// where shards may be shorter or empty. Each index lands in exactly one shard.
pub fn shard_bounds(len: usize, max_concurrency: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }

    let shard_count: usize = max_concurrency.clamp(1, len);
    let shard_size: usize = len.div_ceil(shard_count);

    (0..shard_count)
        .map(|shard| {
            let start = (shard * shard_size).min(len);
            let end = (start + shard_size).min(len);
            start..end
        })
        .collect()
}

async fn probe_shard<P>(
    prober: &P,
    host: Ipv4Addr,
    ports: &[u16],
    probe_timeout: Duration,
) -> Result<Vec<u16>, ProbeError>
where
    P: Prober + ?Sized,
{
    let mut open_ports: Vec<u16> = Vec::new();
    for &port in ports {
        let addr = SocketAddr::new(IpAddr::V4(host), port);
        if prober.is_open(addr, probe_timeout).await? {
            open_ports.push(port);
        }
    }
    Ok(open_ports)
}

fn join_ports(ports: &[u16]) -> String {
    if ports.is_empty() {
        return "none".to_string();
    }
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(",")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
