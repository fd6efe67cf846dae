//! Opt-in `tracing` setup for hosts embedding the engine.
//!
//! The engine only emits events: transform commits and debounce coalescing at
//! `trace`, cluster recomputation and discrete intents at `debug`. Nothing is
//! printed unless a subscriber is installed here or by the host.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "timeline_atlas=info,warn";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or
/// [`DEFAULT_FILTER`] when the variable is absent.
///
/// Returns `false` without the `telemetry` feature or when a global subscriber
/// is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"timeline_atlas=trace"` while tuning debounce behavior.
#[must_use]
pub fn init_tracing(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
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
