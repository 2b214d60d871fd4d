//! Logging utilities.
//!
//! The crate itself only talks to the `log` facade. This module offers an
//! `env_logger` setup for binaries and tests that want to see tessellator
//! diagnostics without wiring a backend themselves.

mod init;

pub use init::{init_logging, LoggingConfig};
