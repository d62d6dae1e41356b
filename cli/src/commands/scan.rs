use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, error, warn};

use crate::commands::CommandLine;
use crate::output::ResultFile;
use crate::terminal::{colors, print, spinner};
use portsweep_common::network::host::HostResult;
use portsweep_common::sink::{LogSink, NullSink, TracingSink, timestamp};
use portsweep_core::scanner::{ScanEngine, ScanError};

pub async fn scan(cmd: &CommandLine) -> anyhow::Result<()> {
    let started_at: String = timestamp();
    let result_file: ResultFile = ResultFile::prepare(&cmd.path, &cmd.ip)?;
    print_setup(cmd, &started_at, &result_file);

    let sink: Arc<dyn LogSink> = if cmd.quiet {
        Arc::new(NullSink)
    } else {
        Arc::new(TracingSink)
    };
    let engine = ScanEngine::new(cmd.scan_config().with_log_sink(sink));

    let span = spinner::scan_span(&cmd.ip);
    let progress = span.clone();
    let mut with_open_ports: usize = 0;
    let mut seen: usize = 0;

    let start_time: Instant = Instant::now();
    let outcome = engine
        .run_each(&cmd.ip, &cmd.ports, |result: HostResult| {
            seen += 1;
            if result.has_open_ports() {
                with_open_ports += 1;
                print::host_result(&result);
                if let Err(e) = result_file.append(&result) {
                    error!("Failed to record {}: {e:#}", result.host());
                }
            }
            spinner::report_progress(&progress, seen, with_open_ports);
        })
        .instrument(span)
        .await;

    let scanned: usize = match outcome {
        Ok(scanned) => scanned,
        Err(e) => {
            if matches!(e, ScanError::Probe(_)) {
                error!(
                    "Out of sockets with {} workers; lower --concurrency or raise `ulimit -n`",
                    cmd.concurrency
                );
            }
            return Err(e.into());
        }
    };

    if with_open_ports == 0 {
        warn!("No open ports found on {}", cmd.ip);
    }

    scan_ends(scanned, with_open_ports, start_time.elapsed(), &result_file);
    Ok(())
}

fn print_setup(cmd: &CommandLine, started_at: &str, result_file: &ResultFile) {
    print::header("port scan");
    print::key_value("Started", started_at);
    print::key_value("Target", &cmd.ip);
    print::key_value("Ports", &cmd.ports);
    print::key_value("Timeout", format!("{}ms", cmd.timeout));
    print::key_value("Workers", cmd.concurrency);
    print::key_value("Output", result_file.path().display());
}

fn scan_ends(scanned: usize, with_open_ports: usize, total_time: Duration, result_file: &ResultFile) {
    let hosts: ColoredString = format!("{with_open_ports}/{scanned} hosts").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Scan Complete: {hosts} with open ports in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
    print::key_value("Finished", timestamp());
    if with_open_ports > 0 {
        print::key_value("Saved", result_file.path().display());
    }
}
