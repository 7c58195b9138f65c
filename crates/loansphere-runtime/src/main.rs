//! # LoanSphere Runtime
//!
//! Boots the core against the configured storage and reports what it loaded.

use anyhow::{Context, Result};
use tracing::{info, warn};

use loansphere_runtime::{CoreContainer, RuntimeConfig};
use ls_telemetry::{init_logging, TelemetryConfig};

fn main() -> Result<()> {
    // Logging first, so configuration warnings are visible
    init_logging(&TelemetryConfig::from_env()).context("failed to initialise logging")?;

    let config = RuntimeConfig::from_env();
    config.validate().context("invalid runtime configuration")?;

    info!("===========================================");
    info!("  LoanSphere Core v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let core = CoreContainer::new(config);
    let summary = core.summary();

    info!(
        storage = %summary.storage,
        accounts = summary.accounts,
        loans = summary.loans,
        offers = summary.offers,
        transactions = summary.transactions,
        activity_entries = summary.activity_entries,
        unread_notifications = summary.unread_notifications,
        "Collections loaded"
    );
    match core.current_principal() {
        Some(principal) => info!(name = %principal.name, role = %principal.role, "Session restored"),
        None => info!("No active session"),
    }
    if summary.persist_failures > 0 {
        warn!(failures = summary.persist_failures, "Some collections could not be written");
    }

    Ok(())
}
