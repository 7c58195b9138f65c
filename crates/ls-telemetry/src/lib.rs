//! # LoanSphere Telemetry
//!
//! Structured logging for every LoanSphere crate. Libraries only emit
//! `tracing` events; binaries call [`init_logging`] once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ls_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // ...
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LS_SERVICE_NAME` | `loansphere` | Service name on startup events |
//! | `LS_LOG_LEVEL` | `RUST_LOG`, then `info` | `EnvFilter` directive |
//! | `LS_CONSOLE_OUTPUT` | `true` | Write log lines to stdout |
//! | `LS_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
