//! Optional subscriber setup for binaries and ad-hoc runs.

use std::fmt;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt as tsfmt};

use crate::core::conversions::kathmandu_now;

/// Timestamps log lines in Nepal time, e.g. `2025-07-29 16:15:02.123 +0545`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KathmanduTime;

impl FormatTime for KathmanduTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", kathmandu_now().format("%Y-%m-%d %H:%M:%S%.3f %z"))
    }
}

/// Installs a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tsfmt()
        .with_env_filter(filter)
        .with_timer(KathmanduTime)
        .with_target(false)
        .try_init()
        .is_ok()
}
