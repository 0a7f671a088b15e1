//! Session-wide crossing tallies shared between the engine and observers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;

use crate::counter::track_state::Direction;

/// Entry/exit tallies for one counting session.
///
/// Written only by the single per-session [`CrossingEngine`] writer, read
/// concurrently by any number of observers (stream overlay, stats writer).
/// Counts are monotonically non-decreasing between [`reset`] calls.
///
/// [`CrossingEngine`]: crate::counter::CrossingEngine
/// [`reset`]: SharedCounters::reset
#[derive(Debug, Default)]
pub struct SharedCounters {
    entries: AtomicU64,
    exits: AtomicU64,
    running: AtomicBool,
}

/// Point-in-time view of [`SharedCounters`], shaped for downstream
/// JSON stats writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountsSnapshot {
    pub entries: u64,
    pub exits: u64,
    /// `entries - exits`; negative when more subjects left than arrived.
    pub net: i64,
    pub running: bool,
}

impl SharedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_entry(&self) {
        self.entries.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_exit(&self) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment(&self, direction: Direction) {
        match direction {
            Direction::Entry => self.increment_entry(),
            Direction::Exit => self.increment_exit(),
        }
    }

    /// Zero both tallies and clear the running flag.
    ///
    /// Call exactly once at session start; resetting mid-session leaves
    /// in-flight track state with a mismatched baseline.
    pub fn reset(&self) {
        self.entries.store(0, Ordering::SeqCst);
        self.exits.store(0, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> CountsSnapshot {
        let entries = self.entries.load(Ordering::SeqCst);
        let exits = self.exits.load(Ordering::SeqCst);
        CountsSnapshot {
            entries,
            exits,
            net: entries as i64 - exits as i64,
            running: self.running.load(Ordering::SeqCst),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_net_tracks_difference() {
        let counters = SharedCounters::new();
        counters.increment_entry();
        counters.increment_entry();
        counters.increment_exit();

        let snap = counters.snapshot();
        assert_eq!(snap.entries, 2);
        assert_eq!(snap.exits, 1);
        assert_eq!(snap.net, 1);
    }

    #[test]
    fn test_net_may_be_negative() {
        let counters = SharedCounters::new();
        counters.increment_exit();
        counters.increment_exit();
        assert_eq!(counters.snapshot().net, -2);
    }

    #[test]
    fn test_reset_zeroes_and_stops() {
        let counters = SharedCounters::new();
        counters.increment_entry();
        counters.set_running(true);
        counters.reset();

        let snap = counters.snapshot();
        assert_eq!(snap.entries, 0);
        assert_eq!(snap.exits, 0);
        assert_eq!(snap.net, 0);
        assert!(!snap.running);
    }

    #[test]
    fn test_concurrent_readers_see_consistent_totals() {
        let counters = Arc::new(SharedCounters::new());
        let writer = {
            let counters = Arc::clone(&counters);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    counters.increment_entry();
                    counters.increment_exit();
                }
            })
        };

        // Readers poll while the single writer increments; totals only grow.
        let mut last_entries = 0;
        while !writer.is_finished() {
            let snap = counters.snapshot();
            assert!(snap.entries >= last_entries);
            last_entries = snap.entries;
        }
        writer.join().unwrap();

        let snap = counters.snapshot();
        assert_eq!(snap.entries, 1000);
        assert_eq!(snap.exits, 1000);
        assert_eq!(snap.net, 0);
    }

    #[test]
    fn test_snapshot_serializes_for_stats_writer() {
        let counters = SharedCounters::new();
        counters.increment_entry();
        counters.set_running(true);

        let json = serde_json::to_string(&counters.snapshot()).unwrap();
        assert_eq!(json, r#"{"entries":1,"exits":0,"net":1,"running":true}"#);
    }
}
