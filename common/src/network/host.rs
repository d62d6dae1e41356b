use std::fmt;
use std::net::Ipv4Addr;

/// Outcome of scanning one host: the ports that accepted a connection.
///
/// Open ports are kept sorted so two scans of the same host compare equal no
/// matter in which order the workers finished.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostResult {
    host: Ipv4Addr,
    open_ports: Vec<u16>,
}

impl HostResult {
    pub fn new(host: Ipv4Addr, mut open_ports: Vec<u16>) -> Self {
        open_ports.sort_unstable();
        open_ports.dedup();
        Self { host, open_ports }
    }

    pub fn host(&self) -> Ipv4Addr {
        self.host
    }

    pub fn open_ports(&self) -> &[u16] {
        &self.open_ports
    }

    pub fn has_open_ports(&self) -> bool {
        !self.open_ports.is_empty()
    }
}

impl fmt::Display for HostResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports: Vec<String> = self.open_ports.iter().map(u16::to_string).collect();
        write!(f, "ip:{}, open-ports:{}", self.host, ports.join(","))
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
