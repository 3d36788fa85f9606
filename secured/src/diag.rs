//! Diagnostic sink for load-time and lookup-time failures.
//!
//! This module provides:
//!
//! - [`DiagnosticSink`]: The sink collaborator the facade emits to
//! - [`TracingSink`]: A sink forwarding to `tracing` events
//! - [`default_sink`]: The process-wide default, installed at most once
//!
//! The facade never logs secrets through this seam — diagnostics name
//! sources and keys, not values.

use std::sync::{Arc, OnceLock};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Accepts leveled text diagnostics.
///
/// Implement this to route the facade's load/lookup diagnostics into your
/// own logging pipeline, or to capture them in tests.
pub trait DiagnosticSink: Send + Sync {
    /// Records one diagnostic line at the given level.
    fn log(&self, level: Level, message: &str);
}

/// A sink that forwards each diagnostic to a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else if level == Level::INFO {
            tracing::info!("{message}");
        } else if level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
    }
}

static SUBSCRIBER_INSTALLED: OnceLock<()> = OnceLock::new();

/// Returns the process-wide default sink.
///
/// The first call installs a timestamped, leveled `tracing-subscriber`
/// writer (honoring `RUST_LOG`, defaulting to `info`). Repeated calls — and
/// repeated facade constructions — never stack a second writer: installation
/// happens at most once per process, and quietly yields to any subscriber
/// the host application has already set.
#[must_use]
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    SUBSCRIBER_INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
    Arc::new(TracingSink)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sink_is_reentrant() {
        // Second call must not attempt a second subscriber installation.
        let first = default_sink();
        let second = default_sink();
        first.log(Level::INFO, "first");
        second.log(Level::ERROR, "second");
    }
}
