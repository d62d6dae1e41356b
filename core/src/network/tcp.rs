//! TCP connect probing.
//!
//! A probe is one connection attempt bounded by a timeout. Anything short of a
//! completed handshake counts as closed. The one failure that is *not* folded
//! into "closed" is running out of local sockets: once that happens every
//! following probe would fail too, and the scan would report closed ports that
//! were never actually tested.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time::timeout;

#[cfg(unix)]
const EXHAUSTION_CODES: &[i32] = &[23, 24]; // ENFILE, EMFILE
#[cfg(windows)]
const EXHAUSTION_CODES: &[i32] = &[10024]; // WSAEMFILE
#[cfg(not(any(unix, windows)))]
const EXHAUSTION_CODES: &[i32] = &[];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("ran out of local sockets while probing {addr}: {source}")]
    ResourceExhausted {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Decides whether a single port accepts connections.
#[async_trait]
pub trait Prober: Send + Sync {
    /// `Ok(false)` for every ordinary failure (refused, filtered, unreachable).
    async fn is_open(&self, addr: SocketAddr, probe_timeout: Duration) -> Result<bool, ProbeError>;
}

/// Full three-way handshake through the operating system's TCP stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnectProber;

#[async_trait]
impl Prober for TcpConnectProber {
    async fn is_open(&self, addr: SocketAddr, probe_timeout: Duration) -> Result<bool, ProbeError> {
        match timeout(probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(true)
            }
            Ok(Err(source)) if is_descriptor_exhaustion(&source) => {
                Err(ProbeError::ResourceExhausted { addr, source })
            }
            Ok(Err(_)) | Err(_) => Ok(false),
        }
    }
}

/// True when `err` means the process hit its file descriptor or socket limit.
pub fn is_descriptor_exhaustion(err: &io::Error) -> bool {
    if err
        .raw_os_error()
        .is_some_and(|code| EXHAUSTION_CODES.contains(&code))
    {
        return true;
    }
    err.to_string()
        .to_ascii_lowercase()
        .contains("too many open files")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
