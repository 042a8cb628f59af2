//! Global atomic counters for deckcheck observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. at the end of a verification run).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters.
pub struct Metrics {
    games_played: AtomicU64,
    decisions_recorded: AtomicU64,
    events_recorded: AtomicU64,
    violations_found: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            games_played: AtomicU64::new(0),
            decisions_recorded: AtomicU64::new(0),
            events_recorded: AtomicU64::new(0),
            violations_found: AtomicU64::new(0),
        }
    }

    pub fn inc_games_played(&self) {
        self.games_played.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "games_played", "counter incremented");
    }

    pub fn inc_decisions_recorded(&self) {
        self.decisions_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_events_recorded(&self) {
        self.events_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_violations(&self, n: u64) {
        self.violations_found.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "violations_found", added = n, "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (end of a verification run) rather
    /// than on every increment.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            games_played = self.games_played(),
            decisions_recorded = self.decisions_recorded(),
            events_recorded = self.events_recorded(),
            violations_found = self.violations_found(),
        );
    }

    pub fn games_played(&self) -> u64 {
        self.games_played.load(Ordering::Relaxed)
    }

    pub fn decisions_recorded(&self) -> u64 {
        self.decisions_recorded.load(Ordering::Relaxed)
    }

    pub fn events_recorded(&self) -> u64 {
        self.events_recorded.load(Ordering::Relaxed)
    }

    pub fn violations_found(&self) -> u64 {
        self.violations_found.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.games_played.store(0, Ordering::Relaxed);
        self.decisions_recorded.store(0, Ordering::Relaxed);
        self.events_recorded.store(0, Ordering::Relaxed);
        self.violations_found.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        assert_eq!(m.games_played(), 0);
        m.inc_games_played();
        m.inc_games_played();
        assert_eq!(m.games_played(), 2);

        m.inc_decisions_recorded();
        assert_eq!(m.decisions_recorded(), 1);

        m.inc_events_recorded();
        m.inc_events_recorded();
        m.inc_events_recorded();
        assert_eq!(m.events_recorded(), 3);

        m.add_violations(4);
        assert_eq!(m.violations_found(), 4);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_games_played();
        m.inc_decisions_recorded();
        m.inc_events_recorded();
        m.add_violations(1);
        m.reset();
        assert_eq!(m.games_played(), 0);
        assert_eq!(m.decisions_recorded(), 0);
        assert_eq!(m.events_recorded(), 0);
        assert_eq!(m.violations_found(), 0);
    }
}
