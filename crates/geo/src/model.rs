//! # Geometry Model
//!
//! Plain value types shared by every pipeline stage. None of them carry a
//! unit: raw importer output is in source units (feet), transformed output is
//! in local meters, and callers keep the two apart.
//!
//! ## Table of Contents
//! 1. Point2D
//! 2. Polyline — ordered run of at least two points
//! 3. BoundingBox — axis-aligned extents
//! 4. GroupStats — part/point counts for logging

use serde::{Deserialize, Serialize};

// ============================================================================
// 1. Point2D
// ============================================================================

/// A planar `(x, y)` coordinate.
pub type Point2D = geo::Coord<f64>;

// ============================================================================
// 2. Polyline — ordered run of at least two points
// ============================================================================

/// An ordered sequence of two or more points: one LineString, one
/// MultiLineString part, or one polygon ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct Polyline(Vec<Point2D>);

impl Polyline {
    /// Minimum number of points a polyline may hold
    pub const MIN_POINTS: usize = 2;

    /// Build a polyline, or `None` when fewer than two points are given.
    pub fn new(points: Vec<Point2D>) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }
        Some(Self(points))
    }

    /// Build from `(x, y)` tuples
    pub fn from_xy(points: &[(f64, f64)]) -> Option<Self> {
        Self::new(points.iter().map(|&(x, y)| Point2D { x, y }).collect())
    }

    pub fn points(&self) -> &[Point2D] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a polyline never holds fewer than two points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Point2D {
        self.0[0]
    }

    pub fn last(&self) -> Point2D {
        self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.0.iter()
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Point2D>> for Polyline {
    type Error = String;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        let count = points.len();
        Polyline::new(points)
            .ok_or_else(|| format!("polyline needs at least 2 points, got {}", count))
    }
}

impl From<Polyline> for Vec<Point2D> {
    fn from(polyline: Polyline) -> Self {
        polyline.0
    }
}

impl From<Polyline> for geo::LineString<f64> {
    fn from(polyline: Polyline) -> Self {
        geo::LineString::new(polyline.0)
    }
}

// ============================================================================
// 3. BoundingBox — axis-aligned extents
// ============================================================================

/// Axis-aligned box with `min.x <= max.x` and `min.y <= max.y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Extent along X (`max.x - min.x`)
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y (`max.y - min.y`)
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `point` lies inside or on the edge of the box
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

impl From<BoundingBox> for geo::Rect<f64> {
    fn from(bbox: BoundingBox) -> Self {
        geo::Rect::new(bbox.min, bbox.max)
    }
}

// ============================================================================
// 4. GroupStats — part/point counts for logging
// ============================================================================

/// Number of polylines and total points in one polyline group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub parts: usize,
    pub points: usize,
}

impl GroupStats {
    pub fn of(polylines: &[Polyline]) -> Self {
        Self {
            parts: polylines.len(),
            points: polylines.iter().map(Polyline::len).sum(),
        }
    }
}
