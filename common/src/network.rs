pub mod host;
pub mod ports;
pub mod range;
pub mod target;
