//! Trait for external tracking backends.

use serde::Serialize;

/// One tracked object's centroid in a single frame.
///
/// This is the entire contract between the counting core and whatever
/// detection-and-tracking backend produces it. The backend guarantees that
/// `id` stays stable across frames for one physical subject and is never
/// reused for a different subject within a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackedObservation {
    /// Stable track identifier.
    pub id: u32,
    /// Centroid x.
    pub x: f32,
    /// Centroid y.
    pub y: f32,
}

impl TrackedObservation {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Observation at the center of a TLBR bounding box
    /// (left, top, right, bottom).
    pub fn from_tlbr(id: u32, l: f32, t: f32, r: f32, b: f32) -> Self {
        Self::new(id, (l + r) / 2.0, (t + b) / 2.0)
    }

    /// Observation at the center of a TLWH bounding box
    /// (top-left x, top-left y, width, height).
    pub fn from_tlwh(id: u32, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(id, x + w / 2.0, y + h / 2.0)
    }
}

/// Everything a tracking backend reports for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameObservations {
    /// Objects tracked in this frame.
    pub tracked: Vec<TrackedObservation>,
    /// Identifiers the backend has given up on since the previous frame.
    /// Each drives a `notify_track_lost` cleanup in the engine.
    pub lost: Vec<u32>,
}

impl FrameObservations {
    pub fn new(tracked: Vec<TrackedObservation>, lost: Vec<u32>) -> Self {
        Self { tracked, lost }
    }
}

impl From<Vec<TrackedObservation>> for FrameObservations {
    fn from(tracked: Vec<TrackedObservation>) -> Self {
        Self {
            tracked,
            lost: Vec::new(),
        }
    }
}

/// Trait for tracking backends that feed the counting pipeline.
///
/// Implement this to connect any detector/tracker stack to the counter.
///
/// # Example
///
/// ```ignore
/// use crosscount_rs::{ObservationSource, FrameObservations};
///
/// struct MyTracker {
///     // Your detector + tracker here
/// }
///
/// impl ObservationSource for MyTracker {
///     type Error = std::io::Error;
///
///     fn observe(&mut self, input: &[u8], width: u32, height: u32) -> Result<FrameObservations, Self::Error> {
///         // Run detection + tracking and report centroids and losses
///         Ok(FrameObservations::default())
///     }
/// }
/// ```
pub trait ObservationSource {
    /// Error type for tracking failures.
    type Error;

    /// Run the backend on raw frame data and report this frame's
    /// observations.
    ///
    /// # Arguments
    /// * `input` - Raw frame bytes (format depends on implementation)
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    fn observe(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameObservations, Self::Error>;
}
