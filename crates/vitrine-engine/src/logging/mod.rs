//! Logging utilities.
//!
//! Centralizes logger initialization on top of the `log` facade; library code
//! only ever calls the `log` macros.

mod init;

pub use init::{init_logging, LoggingConfig};
