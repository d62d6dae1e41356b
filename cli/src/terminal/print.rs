use std::fmt::Display;

use colored::*;
use tracing::info;

use crate::terminal::colors;
use portsweep_common::network::host::HostResult;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "portsweep::print";

const KEY_WIDTH: usize = 8;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner() {
    let text: String = format!("⟦ PORTSWEEP v{} ⟧", env!("CARGO_PKG_VERSION"));
    let sep_width: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(&text)) / 2;
    let sep: ColoredString = "═".repeat(sep_width).color(colors::SEPARATOR);
    print(&format!("{}{}{}", sep, text.color(colors::PRIMARY).bold(), sep));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = console::measure_text_width(&formatted);

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().color(colors::PRIMARY),
        "─".repeat(right)
    )
    .color(colors::SEPARATOR);

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

/// `Key.....: value`, keys padded to a common width.
pub fn key_value<V: Display>(key: &str, value: V) {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    print_status(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value.to_string().color(colors::TEXT_DEFAULT)
    ));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    print(&format!("{} {}", prefix, msg.as_ref()));
}

pub fn host_result(result: &HostResult) {
    let ports: Vec<String> = result.open_ports().iter().map(u16::to_string).collect();
    print_status(format!(
        "{} {} {}",
        result.host().to_string().color(colors::ACCENT).bold(),
        "open:".color(colors::SEPARATOR),
        ports.join(", ").color(colors::TEXT_DEFAULT)
    ));
}

pub fn centerln(msg: &str) {
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}", space, msg));
}
