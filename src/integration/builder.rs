//! Builder for creating observations from various bounding box formats.

use super::TrackedObservation;

/// Builder for creating `TrackedObservation` objects from the bounding box
/// formats trackers commonly report.
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    id: u32,
    cx: f32,
    cy: f32,
}

impl ObservationBuilder {
    /// Create a new observation builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stable track identifier.
    pub fn id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Set the centroid from a TLBR box (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.cx = (x1 + x2) / 2.0;
        self.cy = (y1 + y2) / 2.0;
        self
    }

    /// Set the centroid from a TLWH box (top-left x, top-left y, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.cx = x + w / 2.0;
        self.cy = y + h / 2.0;
        self
    }

    /// Set the centroid directly from an XYWH box (center x, center y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, _w: f32, _h: f32) -> Self {
        self.cx = cx;
        self.cy = cy;
        self
    }

    /// Build the final `TrackedObservation`.
    pub fn build(self) -> TrackedObservation {
        TrackedObservation::new(self.id, self.cx, self.cy)
    }
}
