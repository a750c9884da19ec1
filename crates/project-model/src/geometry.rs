//! Pan/crop geometry in video pixel space.
//!
//! `(0, 0)` is the top-left of the source frame; `x` grows to the right
//! and `y` grows downward.

use serde::{Deserialize, Serialize};

/// A 2D point or vector in video pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when used as a displacement.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn offset(&self, delta: Vertex) -> Vertex {
        Vertex::new(self.x + delta.x, self.y + delta.y)
    }
}

/// The four corners of a pan/crop rectangle.
///
/// Corners are stored independently so a host may hand over rotated or
/// skewed bounds; width and height are always read along the top and left
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionBounds {
    pub top_left: Vertex,
    pub top_right: Vertex,
    pub bottom_right: Vertex,
    pub bottom_left: Vertex,
}

impl MotionBounds {
    pub fn new(
        top_left: Vertex,
        top_right: Vertex,
        bottom_right: Vertex,
        bottom_left: Vertex,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Bounds covering the whole source frame (no zoom, no pan).
    pub fn full_frame(width: f64, height: f64) -> Self {
        Self::new(
            Vertex::new(0.0, 0.0),
            Vertex::new(width, 0.0),
            Vertex::new(width, height),
            Vertex::new(0.0, height),
        )
    }

    /// Horizontal extent along the top edge.
    pub fn width(&self) -> f64 {
        self.top_right.x - self.top_left.x
    }

    /// Vertical extent along the left edge.
    pub fn height(&self) -> f64 {
        self.bottom_left.y - self.top_left.y
    }

    /// Mean of the four corners.
    pub fn center(&self) -> Vertex {
        Vertex::new(
            (self.top_left.x + self.top_right.x + self.bottom_right.x + self.bottom_left.x) / 4.0,
            (self.top_left.y + self.top_right.y + self.bottom_right.y + self.bottom_left.y) / 4.0,
        )
    }

    /// Whether both dimensions are strictly positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Scale every corner about the center, independently per axis.
    pub fn scale_by(&mut self, factor: Vertex) {
        let c = self.center();
        for corner in self.corners_mut() {
            corner.x = c.x + (corner.x - c.x) * factor.x;
            corner.y = c.y + (corner.y - c.y) * factor.y;
        }
    }

    /// Translate every corner by the same vector.
    pub fn move_by(&mut self, delta: Vertex) {
        for corner in self.corners_mut() {
            *corner = corner.offset(delta);
        }
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Vertex; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    fn corners_mut(&mut self) -> [&mut Vertex; 4] {
        [
            &mut self.top_left,
            &mut self.top_right,
            &mut self.bottom_right,
            &mut self.bottom_left,
        ]
    }
}
