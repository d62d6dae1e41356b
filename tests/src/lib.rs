//! End-to-end scans against real loopback listeners.

#[cfg(test)]
mod scan;
