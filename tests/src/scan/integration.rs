use std::net::Ipv4Addr;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use portsweep_common::config::ScanConfig;
use portsweep_common::network::host::HostResult;
use portsweep_common::sink::LogSink;
use portsweep_core::scanner::{ScanEngine, ScanError};
use tokio::net::TcpListener;

const LOCALHOST: Ipv4Addr = Ipv4Addr::LOCALHOST;

fn config(workers: usize) -> ScanConfig {
    ScanConfig::new(
        Duration::from_millis(300),
        NonZeroUsize::new(workers).expect("non-zero worker count"),
    )
}

async fn listen() -> anyhow::Result<(TcpListener, u16)> {
    let listener = TcpListener::bind((LOCALHOST, 0)).await?;
    let port = listener.local_addr()?.port();
    Ok((listener, port))
}

/// A port that was just released, so connecting to it is refused.
async fn closed_port() -> anyhow::Result<u16> {
    let (listener, port) = listen().await?;
    drop(listener);
    Ok(port)
}

/// Two listeners stay open and one freed port sits in between; only the
/// listeners are reported.
#[tokio::test]
async fn finds_open_loopback_ports() -> anyhow::Result<()> {
    let (_first, open_a) = listen().await?;
    let (_second, open_b) = listen().await?;
    let closed = closed_port().await?;

    let engine = ScanEngine::new(config(4));
    let spec = format!("{open_a},{closed},{open_b}");
    let results: Vec<HostResult> = engine.run("127.0.0.1", &spec).await?;

    let mut expected = vec![open_a, open_b];
    expected.sort_unstable();
    assert_eq!(results, vec![HostResult::new(LOCALHOST, expected)]);
    Ok(())
}

#[tokio::test]
async fn hostname_resolves_to_loopback() -> anyhow::Result<()> {
    let (_listener, port) = listen().await?;

    let engine = ScanEngine::new(config(1));
    let hosts = engine.resolve_hosts("localhost").await;

    // Some hosts map `localhost` to ::1 only; nothing to scan there.
    let Ok(hosts) = hosts else { return Ok(()) };
    assert_eq!(hosts.len(), 1);

    if hosts[0] == LOCALHOST {
        let results = engine.run("localhost", &port.to_string()).await?;
        assert_eq!(results[0].open_ports(), &[port]);
    }
    Ok(())
}

/// The listener is bound to 127.0.0.1 only, so 127.0.0.2 has nothing open.
#[tokio::test]
async fn last_octet_range_reports_each_host() -> anyhow::Result<()> {
    let (_listener, port) = listen().await?;

    let engine = ScanEngine::new(config(8));
    let results = engine.run("127.0.0.1-2", &port.to_string()).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0], HostResult::new(LOCALHOST, vec![port]));
    assert_eq!(results[1].host(), Ipv4Addr::new(127, 0, 0, 2));
    assert!(!results[1].has_open_ports());
    Ok(())
}

#[tokio::test]
async fn more_workers_than_ports_still_scans_everything() -> anyhow::Result<()> {
    let (_listener, port) = listen().await?;

    let engine = ScanEngine::new(config(500));
    let results = engine.run("127.0.0.1", &port.to_string()).await?;

    assert_eq!(results[0].open_ports(), &[port]);
    Ok(())
}

#[tokio::test]
async fn progress_lines_reach_the_sink() -> anyhow::Result<()> {
    let (_listener, port) = listen().await?;
    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let collected = Arc::clone(&lines);
    let sink: Arc<dyn LogSink> = Arc::new(move |line: &str| {
        collected.lock().unwrap().push(line.to_string());
    });

    let engine = ScanEngine::new(config(2).with_log_sink(sink));
    engine.run("127.0.0.1", &format!("{port}")).await?;

    let lines = lines.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("[127.0.0.1]") && l.contains("ports to scan")));
    assert!(lines.iter().any(|l| l.contains("scan finished") && l.contains(&port.to_string())));
    Ok(())
}

#[tokio::test]
async fn malformed_input_is_rejected_before_scanning() {
    let engine = ScanEngine::new(config(4));

    assert!(matches!(
        engine.run("127.0.0.1", "").await,
        Err(ScanError::PortSpec(_))
    ));
    assert!(matches!(
        engine.run("nosuchhost.invalid", "80").await,
        Err(ScanError::Target(_))
    ));
}
