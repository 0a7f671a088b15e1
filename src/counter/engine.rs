//! Per-track crossing detection and counting.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::counter::boundary::BoundaryModel;
use crate::counter::counts::{CountsSnapshot, SharedCounters};
use crate::counter::error::CounterError;
use crate::counter::track_state::{Direction, TrackState};

/// Tuning knobs for crossing confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Consecutive observations that must agree with a flipped side before
    /// the crossing is confirmed. Rejects high-frequency jitter near the
    /// line.
    pub debounce_threshold: u32,
    /// Minimum distance (pixels) past the line the confirming observation
    /// must reach. Rejects approach-and-retreat motion that never truly
    /// crosses.
    pub min_distance: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            debounce_threshold: 3,
            min_distance: 40.0,
        }
    }
}

/// A confirmed, counted crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossingEvent {
    pub direction: Direction,
    pub track_id: u32,
    /// Position of the confirming observation.
    pub x: f32,
    pub y: f32,
    /// Distance from the confirming observation to the line.
    pub distance: f32,
}

/// Session-scoped crossing counter.
///
/// Feed every tracked observation through [`update`] in frame order. The
/// engine owns the per-track state map; [`SharedCounters`] is the only
/// cross-thread-visible piece, so the engine itself must stay behind a
/// single writer per session while observers snapshot counts concurrently.
///
/// [`update`]: CrossingEngine::update
pub struct CrossingEngine {
    boundary: BoundaryModel,
    config: CounterConfig,
    tracks: HashMap<u32, TrackState>,
    counters: Arc<SharedCounters>,
}

impl CrossingEngine {
    pub fn new(
        boundary: BoundaryModel,
        config: CounterConfig,
        counters: Arc<SharedCounters>,
    ) -> Self {
        Self {
            boundary,
            config,
            tracks: HashMap::new(),
            counters,
        }
    }

    /// Process one observation of a tracked object's centroid.
    ///
    /// Returns `Ok(Some(event))` when this observation confirms a counted
    /// crossing, `Ok(None)` otherwise. Non-finite or out-of-frame
    /// coordinates fail with [`CounterError::InvalidObservation`] and leave
    /// all state untouched; callers skip the observation and continue.
    pub fn update(
        &mut self,
        track_id: u32,
        x: f32,
        y: f32,
    ) -> Result<Option<CrossingEvent>, CounterError> {
        if !(x.is_finite() && y.is_finite()) || !self.boundary.contains(x, y) {
            return Err(CounterError::InvalidObservation { track_id, x, y });
        }

        let current = self.boundary.classify(x, y);

        // First observation: baseline only. There is no previous side to
        // compare against, so this can never count.
        let Some(state) = self.tracks.get_mut(&track_id) else {
            debug!(track_id, ?current, "track baseline");
            self.tracks
                .insert(track_id, TrackState::baseline(x, y, current));
            return Ok(None);
        };

        let settled = state.settled_side();
        let mut event = None;

        if current == settled {
            // Back on (or still on) the settled side: any tentative flip is
            // noise, drop it.
            state.pending_from = None;
            state.streak = 0;
        } else {
            state.pending_from = Some(settled);
            state.streak += 1;

            let distance = self.boundary.distance(x, y);
            if state.streak >= self.config.debounce_threshold
                && distance >= self.config.min_distance
            {
                state.pending_from = None;
                state.streak = 0;

                if let Some(direction) = Direction::between(settled, current) {
                    // A reversal re-arms the marker so back-and-forth
                    // motion is recountable; a repeat of the already
                    // counted direction stays suppressed.
                    if state.counted == Some(direction.opposite()) {
                        state.counted = None;
                    }
                    if state.counted != Some(direction) {
                        self.counters.increment(direction);
                        state.counted = Some(direction);
                        info!(
                            track_id,
                            ?direction,
                            from_x = state.x,
                            from_y = state.y,
                            x,
                            y,
                            distance,
                            "confirmed crossing"
                        );
                        event = Some(CrossingEvent {
                            direction,
                            track_id,
                            x,
                            y,
                            distance,
                        });
                    }
                }
            }
        }

        state.x = x;
        state.y = y;
        state.side = current;
        Ok(event)
    }

    /// Drop all state for a track the external tracker has given up on.
    ///
    /// A reappearing identifier is treated as brand-new: its first
    /// observation re-baselines and never counts.
    pub fn notify_track_lost(&mut self, track_id: u32) {
        if self.tracks.remove(&track_id).is_some() {
            debug!(track_id, "track lost, state dropped");
        }
    }

    /// Start a fresh session: clear all track state and zero the counters.
    pub fn reset(&mut self) {
        self.tracks.clear();
        self.counters.reset();
    }

    pub fn snapshot_counts(&self) -> CountsSnapshot {
        self.counters.snapshot()
    }

    pub fn boundary(&self) -> &BoundaryModel {
        &self.boundary
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn counters(&self) -> &Arc<SharedCounters> {
        &self.counters
    }

    /// Number of identifiers currently holding state.
    pub fn active_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Log and swallow an observation failure, per the skip-and-continue
    /// contract. Used by callers that drive the engine from a frame loop.
    pub(crate) fn skip_invalid(err: &CounterError) {
        warn!(%err, "observation rejected");
    }
}
