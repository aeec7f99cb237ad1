//! Shared tracing/logging setup for terragate hosts.
//!
//! The engine crates emit through the `tracing` macros only; whichever shell
//! embeds them (desktop, server, test harness) calls [`init`] once at
//! startup to install the subscriber.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
