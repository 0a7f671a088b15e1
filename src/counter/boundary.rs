//! Counting line geometry: construction, side classification, distance.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::counter::error::CounterError;
use crate::counter::track_state::Side;

/// Minimum gap (pixels) kept between the line coordinate and the frame edge
/// so the debounce distance gate has room to operate on both sides.
pub const EDGE_MARGIN: f32 = 50.0;

/// Maximum tilt (degrees) supported for a horizontal counting line.
pub const MAX_ANGLE_DEG: f32 = 30.0;

/// User-facing description of a counting line, before clamping to a frame.
///
/// Supports two kinds of line:
/// - Horizontal (optionally tilted up to ±30°): crossing top→bottom counts
///   as an entry, bottom→top as an exit.
/// - Vertical: crossing left→right counts as an entry, right→left as an exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundarySpec {
    Horizontal {
        /// Line y-coordinate (anchor row for a tilted line).
        y: f32,
        /// Tilt in degrees, in [-30, 30].
        angle_deg: f32,
        /// Left extent of the drawn segment.
        x1: f32,
        /// Right extent of the drawn segment.
        x2: f32,
    },
    Vertical {
        /// Line x-coordinate.
        x: f32,
    },
}

impl BoundarySpec {
    /// A level horizontal line at row `y` spanning the whole frame.
    pub fn horizontal(y: f32) -> Self {
        Self::Horizontal {
            y,
            angle_deg: 0.0,
            x1: 0.0,
            x2: f32::MAX,
        }
    }

    /// A tilted horizontal line anchored at the midpoint of `x1..x2`.
    pub fn angled(y: f32, angle_deg: f32, x1: f32, x2: f32) -> Self {
        Self::Horizontal {
            y,
            angle_deg,
            x1,
            x2,
        }
    }

    /// A vertical line at column `x`.
    pub fn vertical(x: f32) -> Self {
        Self::Vertical { x }
    }

    /// A vertical line through the center column of a frame.
    pub fn centered_vertical(frame_width: f32) -> Self {
        Self::Vertical {
            x: frame_width / 2.0,
        }
    }

    /// A level horizontal line through the center row of a frame.
    pub fn centered_horizontal(frame_height: f32) -> Self {
        Self::horizontal(frame_height / 2.0)
    }
}

/// Immutable counting line, resolved against a concrete frame size.
///
/// The line is stored as the coefficients (a, b, c) of the linear form
/// `a·x + b·y + c = 0`, derived once at construction. All operations are
/// pure functions over this state.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryModel {
    kind: LineKind,
    /// Normal vector (a, b) of the linear form.
    normal: Vector2<f32>,
    /// Constant term c of the linear form.
    offset: f32,
    frame_width: f32,
    frame_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind {
    /// Level horizontal line at `y`.
    Horizontal { y: f32 },
    /// Tilted line, classified and measured via the linear form.
    Angled,
    /// Vertical line at `x`.
    Vertical { x: f32 },
}

impl BoundaryModel {
    /// Resolve a [`BoundarySpec`] against a frame, validating and clamping.
    ///
    /// Non-finite parameters, a tilt outside ±30°, and frames too small to
    /// leave [`EDGE_MARGIN`] on both sides of the line all fail with
    /// [`CounterError::InvalidConfiguration`]; finite but out-of-range line
    /// coordinates are clamped into the frame instead.
    pub fn new(
        spec: BoundarySpec,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<Self, CounterError> {
        if !(frame_width.is_finite() && frame_height.is_finite()) {
            return Err(CounterError::InvalidConfiguration(
                "frame dimensions must be finite".into(),
            ));
        }

        let (kind, normal, offset) = match spec {
            BoundarySpec::Vertical { x } => {
                if !x.is_finite() {
                    return Err(CounterError::InvalidConfiguration(
                        "vertical line x must be finite".into(),
                    ));
                }
                let x = clamp_to_extent(x, frame_width)?;
                // x - line_x = 0
                (LineKind::Vertical { x }, Vector2::new(1.0, 0.0), -x)
            }
            BoundarySpec::Horizontal {
                y,
                angle_deg,
                x1,
                x2,
            } => {
                if !(y.is_finite() && angle_deg.is_finite() && x1.is_finite() && x2.is_finite()) {
                    return Err(CounterError::InvalidConfiguration(
                        "horizontal line parameters must be finite".into(),
                    ));
                }
                if angle_deg.abs() > MAX_ANGLE_DEG {
                    return Err(CounterError::InvalidConfiguration(format!(
                        "line angle {angle_deg}° outside supported range ±{MAX_ANGLE_DEG}°"
                    )));
                }
                let y = clamp_to_extent(y, frame_height)?;
                let x1 = x1.clamp(0.0, frame_width);
                let x2 = x2.clamp(0.0, frame_width);

                if angle_deg == 0.0 {
                    // y - line_y = 0
                    (LineKind::Horizontal { y }, Vector2::new(0.0, 1.0), -y)
                } else {
                    // Anchor the tilted line at the segment midpoint. With
                    // |angle| <= 30° the direction cosine never degenerates.
                    let angle_rad = angle_deg.to_radians();
                    let center = Vector2::new((x1 + x2) / 2.0, y);
                    let tan_angle = angle_rad.sin() / angle_rad.cos();
                    let normal = Vector2::new(-tan_angle, 1.0);
                    let offset = tan_angle * center.x - center.y;
                    (LineKind::Angled, normal, offset)
                }
            }
        };

        Ok(Self {
            kind,
            normal,
            offset,
            frame_width,
            frame_height,
        })
    }

    /// Which side of the line the point lies on.
    ///
    /// Vertical lines classify to `Left`/`Right`, horizontal and tilted
    /// lines to `Above`/`Below`. A point exactly on the line classifies as
    /// `Right`/`Below` by convention, which fixes the baseline side of a
    /// track first observed on the line.
    pub fn classify(&self, x: f32, y: f32) -> Side {
        match self.kind {
            LineKind::Vertical { x: line_x } => {
                if x < line_x {
                    Side::Left
                } else {
                    Side::Right
                }
            }
            LineKind::Horizontal { y: line_y } => {
                if y < line_y {
                    Side::Above
                } else {
                    Side::Below
                }
            }
            LineKind::Angled => {
                if self.eval(x, y) < 0.0 {
                    Side::Above
                } else {
                    Side::Below
                }
            }
        }
    }

    /// Distance from the point to the line.
    ///
    /// Axis distance for axis-aligned lines, perpendicular distance
    /// `|a·x + b·y + c| / ‖(a, b)‖` for tilted ones. A degenerate normal
    /// yields 0 rather than an error; the value only gates confirmation.
    pub fn distance(&self, x: f32, y: f32) -> f32 {
        match self.kind {
            LineKind::Vertical { x: line_x } => (x - line_x).abs(),
            LineKind::Horizontal { y: line_y } => (y - line_y).abs(),
            LineKind::Angled => {
                let norm = self.normal.norm();
                if norm > 0.0 {
                    self.eval(x, y).abs() / norm
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether the point lies within the frame this line was resolved for.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.frame_width).contains(&x) && (0.0..=self.frame_height).contains(&y)
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    /// Signed value of the linear form at the point.
    #[inline]
    fn eval(&self, x: f32, y: f32) -> f32 {
        self.normal.dot(&Vector2::new(x, y)) + self.offset
    }
}

/// Clamp a line coordinate to `[EDGE_MARGIN, extent - EDGE_MARGIN]`.
fn clamp_to_extent(coord: f32, extent: f32) -> Result<f32, CounterError> {
    let max = extent - EDGE_MARGIN;
    if max < EDGE_MARGIN {
        return Err(CounterError::InvalidConfiguration(format!(
            "frame extent {extent} leaves no room for a {EDGE_MARGIN}px edge margin"
        )));
    }
    Ok(coord.clamp(EDGE_MARGIN, max))
}
