//! Logging facilities for stepwise.
//!
//! stepwise uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. Applications that want to see navigation decisions
//! install one and filter by the targets below:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("stepwise::navigation=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "stepwise_core::signal";
    /// Step resolution, reachability and transitions.
    pub const NAVIGATION: &str = "stepwise::navigation";
    /// Wizard facade lifecycle (build, restart, save, submit).
    pub const WIZARD: &str = "stepwise::wizard";
    /// Configuration loading.
    pub const CONFIG: &str = "stepwise::config";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Useful for timing an operation that spans several calls.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "stepwise::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_crate_prefix() {
        assert!(targets::SIGNAL.starts_with("stepwise_core::"));
        assert!(targets::NAVIGATION.starts_with("stepwise::"));
        assert!(targets::WIZARD.starts_with("stepwise::"));
    }

    #[test]
    fn test_perf_span() {
        // No subscriber installed; entering and dropping must not panic.
        let _span = PerfSpan::new("test_operation");
    }
}
