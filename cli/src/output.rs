//! Result file written next to the console output.
//!
//! One line per host with open ports, appended as soon as the host is done:
//! `2024-05-01 12:00:00 ip:10.0.0.1, open-ports:22,80`

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use portsweep_common::network::host::HostResult;
use portsweep_common::sink::timestamp;

pub struct ResultFile {
    path: PathBuf,
}

impl ResultFile {
    /// Creates `dir` if needed and picks `<dir>/<host_expr>_port.txt`.
    pub fn prepare(dir: &Path, host_expr: &str) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;

        Ok(Self {
            path: dir.join(format!("{}_port.txt", file_stem(host_expr))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, result: &HostResult) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        writeln!(file, "{}", format_line(&timestamp(), result))
            .with_context(|| format!("writing to {}", self.path.display()))
    }
}

pub fn format_line(timestamp: &str, result: &HostResult) -> String {
    format!("{timestamp} {result}")
}

fn file_stem(host_expr: &str) -> String {
    host_expr
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn line_format() {
        let result = HostResult::new(Ipv4Addr::new(10, 0, 0, 1), vec![80, 22]);
        assert_eq!(
            format_line("2024-05-01 12:00:00", &result),
            "2024-05-01 12:00:00 ip:10.0.0.1, open-ports:22,80"
        );
    }

    #[test]
    fn prepare_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("runs").join("today");

        let file = ResultFile::prepare(&dir, "192.168.1.1-20").unwrap();

        assert!(dir.is_dir());
        assert_eq!(file.path(), dir.join("192.168.1.1-20_port.txt"));
    }

    #[test]
    fn prepare_accepts_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(ResultFile::prepare(tmp.path(), "a").is_ok());
        assert!(ResultFile::prepare(tmp.path(), "a").is_ok());
    }

    #[test]
    fn append_adds_one_line_per_host() {
        let tmp = tempfile::tempdir().unwrap();
        let file = ResultFile::prepare(tmp.path(), "scanme.example").unwrap();

        file.append(&HostResult::new(Ipv4Addr::new(10, 0, 0, 1), vec![22])).unwrap();
        file.append(&HostResult::new(Ipv4Addr::new(10, 0, 0, 2), vec![80, 443])).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" ip:10.0.0.1, open-ports:22"));
        assert!(lines[1].ends_with(" ip:10.0.0.2, open-ports:80,443"));
    }

    #[test]
    fn path_separators_do_not_escape_the_directory() {
        assert_eq!(file_stem("a/b\\c:d"), "a_b_c_d");
    }
}
