//! Opt-in timing of the restyle pipeline.
//!
//! Scopes report their elapsed time as `tracing` events on the `perf`
//! target when timing is enabled with `--perf`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Target used for timing events, so they can be filtered on their own.
pub const TARGET: &str = "perf";

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        tracing::info!(
            target: TARGET,
            scope = self.name,
            elapsed_ms = self.elapsed_ms(),
            "timing"
        );
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start timing `name`; the measurement is reported when the scope drops.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}
