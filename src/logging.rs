//! Log output setup and the process-wide timestamp toggle.
//!
//! Timestamps are on by default. [`suppress_timestamps`] turns them off until
//! the returned guard is dropped, which is how the loader keeps parser
//! diagnostics free of time prefixes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

static TIMESTAMPS: AtomicBool = AtomicBool::new(true);

pub fn timestamps_enabled() -> bool {
    TIMESTAMPS.load(Ordering::SeqCst)
}

/// Sets the timestamp flag and returns its previous value.
pub fn set_timestamps(enabled: bool) -> bool {
    TIMESTAMPS.swap(enabled, Ordering::SeqCst)
}

/// Disables timestamps until the guard is dropped.
///
/// The flag is restored to whatever it was when the guard was taken, so
/// guards nest. Not coordinated with concurrent callers of
/// [`set_timestamps`].
#[must_use = "timestamps are restored as soon as the guard is dropped"]
pub fn suppress_timestamps() -> TimestampGuard {
    TimestampGuard {
        previous: set_timestamps(false),
    }
}

#[derive(Debug)]
pub struct TimestampGuard {
    previous: bool,
}

impl Drop for TimestampGuard {
    fn drop(&mut self) {
        TIMESTAMPS.store(self.previous, Ordering::SeqCst);
    }
}

/// Timer that writes the system time only while the timestamp flag is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleTime;

impl FormatTime for ToggleTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        if timestamps_enabled() {
            SystemTime.format_time(w)
        } else {
            Ok(())
        }
    }
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Fails if a global subscriber is already set.
pub fn init() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(ToggleTime);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}
