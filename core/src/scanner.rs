//! The scan **orchestrator**.
//!
//! [`ScanEngine`] ties the pieces together: it parses the port specification,
//! resolves the host expression, then hands each host to the
//! [`WorkDistributor`] in order and reports one [`HostResult`] per host.
//!
//! **Architectural Note:**
//! Both network touch points sit behind traits ([`Prober`] and
//! [`NameResolver`]). The engine is generic over them so tests can drive the
//! whole pipeline without opening a single socket.

use std::net::Ipv4Addr;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use portsweep_common::config::ScanConfig;
use portsweep_common::error::{PortSpecError, TargetError};
use portsweep_common::network::host::HostResult;
use portsweep_common::network::ports;

use crate::network::tcp::{ProbeError, Prober, TcpConnectProber};

pub mod distributor;
pub mod resolver;

#[cfg(test)]
mod testing;

use distributor::{ScanJob, WorkDistributor};
use resolver::{NameResolver, SystemResolver};

/// Everything that stops a scan before it completes.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    PortSpec(#[from] PortSpecError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("scan worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub struct ScanEngine<P = TcpConnectProber, R = SystemResolver> {
    config: ScanConfig,
    distributor: WorkDistributor<P>,
    resolver: R,
}

impl ScanEngine {
    /// Real TCP connects and system name resolution.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_parts(config, TcpConnectProber, SystemResolver)
    }
}

impl<P, R> ScanEngine<P, R>
where
    P: Prober + 'static,
    R: NameResolver,
{
    pub fn with_parts(config: ScanConfig, prober: P, resolver: R) -> Self {
        Self {
            distributor: WorkDistributor::new(Arc::new(prober), config.clone()),
            config,
            resolver,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn resolve_ports(&self, port_spec: &str) -> Result<Vec<u16>, ScanError> {
        Ok(ports::parse_port_spec(port_spec)?)
    }

    pub async fn resolve_hosts(&self, host_expr: &str) -> Result<Vec<Ipv4Addr>, ScanError> {
        Ok(resolver::resolve_hosts(&self.resolver, host_expr).await?)
    }

    /// Scans every host of `host_expr` against every port of `port_spec`.
    ///
    /// Results come back in resolved host order, one per host, including hosts
    /// without open ports.
    pub async fn run(
        &self,
        host_expr: &str,
        port_spec: &str,
    ) -> Result<Vec<HostResult>, ScanError> {
        let mut results: Vec<HostResult> = Vec::new();
        self.run_each(host_expr, port_spec, |result| results.push(result))
            .await?;
        Ok(results)
    }

    /// Like [`run`](Self::run), but hands each result to `on_result` as soon as
    /// its host is done. Returns the number of hosts scanned.
    ///
    /// Both inputs are resolved before the first probe is sent, so a bad
    /// specification never produces partial output. A fatal probe error stops
    /// the run; hosts after the failing one are never scanned.
    pub async fn run_each<F>(
        &self,
        host_expr: &str,
        port_spec: &str,
        mut on_result: F,
    ) -> Result<usize, ScanError>
    where
        F: FnMut(HostResult),
    {
        let ports: Arc<[u16]> = self.resolve_ports(port_spec)?.into();
        let hosts: Vec<Ipv4Addr> = self.resolve_hosts(host_expr).await?;
        debug!("Scanning {} host(s) across {} port(s)", hosts.len(), ports.len());

        for &host in &hosts {
            let job = ScanJob::new(host, Arc::clone(&ports));
            let open_ports: Vec<u16> = self.distributor.scan_host(&job).await?;
            on_result(HostResult::new(host, open_ports));
        }

        Ok(hosts.len())
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
