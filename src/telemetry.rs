//! Opt-in tracing setup for hosts embedding `curve-chart-rs`.
//!
//! The controller, scheduler and scale tracks emit `tracing` events at
//! `debug`/`trace` level. Hosts either install their own subscriber or call
//! one of the helpers below.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Same as [`init_tracing_with_filter`] with [`DEFAULT_FILTER`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Installs a compact `fmt` subscriber when the `telemetry` feature is on.
///
/// `RUST_LOG` wins over `fallback_filter`. Returns `false` when the feature is
/// disabled or the host already installed a global subscriber.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
