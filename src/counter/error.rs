//! Error types for the counting core.

use thiserror::Error;

/// Errors produced by boundary configuration and observation intake.
///
/// No variant is fatal to the process: callers are expected to skip a bad
/// observation and continue the session, while a configuration error aborts
/// session setup before any state is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CounterError {
    /// Observation coordinates are non-finite or outside the frame.
    /// The track's stored state is left untouched.
    #[error("invalid observation for track {track_id}: ({x}, {y}) is non-finite or out of frame")]
    InvalidObservation { track_id: u32, x: f32, y: f32 },

    /// Boundary parameters cannot produce a usable counting line.
    #[error("invalid boundary configuration: {0}")]
    InvalidConfiguration(String),
}
