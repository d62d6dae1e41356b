use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// A span rendered as a spinner for as long as the scan future runs inside it.
pub fn scan_span(target: &str) -> Span {
    let span = info_span!("scan", indicatif.pb_show = true);

    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
        span.pb_set_style(&style.tick_strings(TICK_STRINGS));
    }
    span.pb_set_message(&format!("Scanning {}...", target.bold()));

    span
}

pub fn report_progress(span: &Span, scanned: usize, with_open_ports: usize) {
    span.pb_set_message(&format!(
        "{} host(s) scanned, {} with open ports",
        scanned.to_string().green().bold(),
        with_open_ports.to_string().green().bold()
    ));
}
