//! Per-track crossing state.

use serde::{Deserialize, Serialize};

/// Which side of the counting line a point lies on.
///
/// Horizontal and tilted lines classify to `Above`/`Below`, vertical lines
/// to `Left`/`Right`. A point exactly on the line is `Below`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Above,
    Below,
    Left,
    Right,
}

/// Direction of a confirmed crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `above → below` or `left → right`.
    Entry,
    /// `below → above` or `right → left`.
    Exit,
}

impl Direction {
    /// Map a settled-side → current-side transition to a direction.
    ///
    /// Returns `None` for side pairs that never occur on one line kind.
    pub(crate) fn between(from: Side, to: Side) -> Option<Direction> {
        match (from, to) {
            (Side::Above, Side::Below) | (Side::Left, Side::Right) => Some(Direction::Entry),
            (Side::Below, Side::Above) | (Side::Right, Side::Left) => Some(Direction::Exit),
            _ => None,
        }
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Entry => Direction::Exit,
            Direction::Exit => Direction::Entry,
        }
    }
}

/// Memory kept for one active track identifier.
///
/// Created on first observation, updated every frame the id is seen, and
/// dropped entirely when the tracker reports the id lost, so a reappearing
/// id starts from the baseline rule again.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackState {
    /// Last accepted position.
    pub x: f32,
    pub y: f32,
    /// Side of the last accepted observation.
    pub side: Side,
    /// Settled side while a tentative flip is being debounced. `None` when
    /// the track is settled on `side`.
    pub pending_from: Option<Side>,
    /// Consecutive observations agreeing with the flipped side.
    pub streak: u32,
    /// Direction already counted for the current crossing. Cleared when the
    /// opposite direction confirms, so legitimate back-and-forth motion is
    /// recountable.
    pub counted: Option<Direction>,
}

impl TrackState {
    /// Baseline state for a first observation: no pending flip, nothing
    /// counted.
    pub fn baseline(x: f32, y: f32, side: Side) -> Self {
        Self {
            x,
            y,
            side,
            pending_from: None,
            streak: 0,
            counted: None,
        }
    }

    /// The side crossings are judged against: the settled side if a flip is
    /// pending, the last observed side otherwise.
    pub fn settled_side(&self) -> Side {
        self.pending_from.unwrap_or(self.side)
    }
}
