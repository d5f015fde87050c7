//! # Coordinate Transform
//!
//! Maps projected source coordinates (EPSG:2230 feet, far from any origin)
//! into a local frame: translate by an offset, then rescale.
//!
//! ```text
//! local = ((x - offset_x) * scale, (y - offset_y) * scale)
//! ```
//!
//! Anchoring the offset at the bounding-box minimum keeps local values small
//! and non-negative, which is what the renderer's f32 world space wants.

use serde::{Deserialize, Serialize};

use crate::model::{BoundingBox, Point2D};

/// International foot in meters; the default source → local scale
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Translate-then-scale transform into local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalTransform {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl LocalTransform {
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self { offset_x, offset_y, scale }
    }

    /// Anchor the transform at `bbox.min`, so `to_local(bbox.min)` is the origin
    pub fn from_bounding_box(bbox: &BoundingBox, scale: f64) -> Self {
        Self::new(bbox.min.x, bbox.min.y, scale)
    }

    pub fn offset(&self) -> Point2D {
        Point2D { x: self.offset_x, y: self.offset_y }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pure arithmetic; NaN and infinities pass straight through.
    pub fn to_local(&self, point: Point2D) -> Point2D {
        Point2D {
            x: (point.x - self.offset_x) * self.scale,
            y: (point.y - self.offset_y) * self.scale,
        }
    }
}

/// Build a transform anchored at the box minimum
pub fn build_transform(bbox: &BoundingBox, scale: f64) -> LocalTransform {
    LocalTransform::from_bounding_box(bbox, scale)
}
