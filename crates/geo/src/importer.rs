//! # GeoJSON Import
//!
//! Validates a GeoJSON FeatureCollection and extracts two independent
//! polyline groups from it: line parts (LineString / MultiLineString) and
//! polygon outer rings (Polygon / MultiPolygon). Each feature feeds at most
//! one of the two groups.
//!
//! Features without a usable geometry, or with a geometry kind outside the
//! group being read, are skipped rather than reported; real GIS exports mix
//! complete and incomplete features. Malformed coordinates inside a
//! supported geometry are a schema error.
//!
//! ## Table of Contents
//! 1. FeatureSource — validated FeatureCollection
//! 2. Line extraction
//! 3. Polygon outer-ring extraction
//! 4. Path-based entry points
//! 5. Geometry decoding helpers

use geojson::Value;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::str::FromStr;

use crate::error::{GeoError, Result};
use crate::model::{Point2D, Polyline};

/// Geometry kinds read by [`FeatureSource::line_geometries`]
const LINE_KINDS: &[&str] = &["LineString", "MultiLineString"];

/// Geometry kinds read by [`FeatureSource::polygon_outer_rings`]
const POLYGON_KINDS: &[&str] = &["Polygon", "MultiPolygon"];

/// A ring needs three vertices to enclose anything
const MIN_RING_POINTS: usize = 3;

// ============================================================================
// 1. FeatureSource — validated FeatureCollection
// ============================================================================

/// A parsed document whose top level is a FeatureCollection with a
/// `features` array. Geometries are decoded lazily by each read pass.
#[derive(Debug, Clone)]
pub struct FeatureSource {
    features: Vec<JsonValue>,
}

impl FeatureSource {
    /// Read and validate a GeoJSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = read_source(path)?;
        let source = Self::from_slice(&bytes)?;
        tracing::debug!(
            "Read {} features from {}",
            source.feature_count(),
            path.display()
        );
        Ok(source)
    }

    /// Parse and validate raw GeoJSON bytes; invalid UTF-8 is a parse error
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let root: JsonValue = serde_json::from_slice(bytes)?;
        Self::from_json(root)
    }

    /// Validate an already-parsed JSON document
    pub fn from_json(root: JsonValue) -> Result<Self> {
        let JsonValue::Object(mut root) = root else {
            return Err(GeoError::schema("top-level value is not an object"));
        };

        let is_collection = root
            .get("type")
            .and_then(JsonValue::as_str)
            .is_some_and(|kind| kind.eq_ignore_ascii_case("FeatureCollection"));
        if !is_collection {
            return Err(GeoError::schema("top-level `type` is not \"FeatureCollection\""));
        }

        match root.remove("features") {
            Some(JsonValue::Array(features)) => Ok(Self { features }),
            Some(_) => Err(GeoError::schema("`features` is not an array")),
            None => Err(GeoError::schema("missing `features` array")),
        }
    }

    /// Number of entries in the `features` array
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    // ========================================================================
    // 2. Line extraction
    // ========================================================================

    /// One polyline per LineString and one per MultiLineString part, in
    /// feature order then part order. Parts with fewer than two points are
    /// dropped.
    pub fn line_geometries(&self) -> Result<Vec<Polyline>> {
        let mut parts = Vec::new();
        let mut passed_over = 0usize;

        for (index, feature) in self.features.iter().enumerate() {
            match decode_geometry(index, feature, LINE_KINDS)? {
                Some(Value::LineString(line)) => {
                    parts.extend(Polyline::new(to_points(index, &line)?));
                }
                Some(Value::MultiLineString(lines)) => {
                    for line in &lines {
                        parts.extend(Polyline::new(to_points(index, line)?));
                    }
                }
                _ => passed_over += 1,
            }
        }

        tracing::debug!(
            "Extracted {} line parts ({} features without line geometry)",
            parts.len(),
            passed_over
        );
        Ok(parts)
    }

    // ========================================================================
    // 3. Polygon outer-ring extraction
    // ========================================================================

    /// The first ring of every Polygon and of every MultiPolygon member.
    /// Holes are never returned; rings with fewer than three points are
    /// dropped.
    pub fn polygon_outer_rings(&self) -> Result<Vec<Polyline>> {
        let mut rings = Vec::new();
        let mut passed_over = 0usize;

        for (index, feature) in self.features.iter().enumerate() {
            match decode_geometry(index, feature, POLYGON_KINDS)? {
                Some(Value::Polygon(polygon)) => {
                    rings.extend(outer_ring(index, &polygon)?);
                }
                Some(Value::MultiPolygon(polygons)) => {
                    for polygon in &polygons {
                        rings.extend(outer_ring(index, polygon)?);
                    }
                }
                _ => passed_over += 1,
            }
        }

        tracing::debug!(
            "Extracted {} outer rings ({} features without polygon geometry)",
            rings.len(),
            passed_over
        );
        Ok(rings)
    }
}

impl FromStr for FeatureSource {
    type Err = GeoError;

    fn from_str(content: &str) -> Result<Self> {
        let root: JsonValue = serde_json::from_str(content)?;
        Self::from_json(root)
    }
}

// ============================================================================
// 4. Path-based entry points
// ============================================================================

/// Validate a FeatureCollection file and return its feature count
pub fn count_features(path: &Path) -> Result<usize> {
    Ok(FeatureSource::from_path(path)?.feature_count())
}

/// Read all line parts from a FeatureCollection file
pub fn read_line_geometries(path: &Path) -> Result<Vec<Polyline>> {
    FeatureSource::from_path(path)?.line_geometries()
}

/// Read all polygon outer rings from a FeatureCollection file
pub fn read_polygon_outer_rings(path: &Path) -> Result<Vec<Polyline>> {
    FeatureSource::from_path(path)?.polygon_outer_rings()
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| GeoError::from_io(path, e))
}

// ============================================================================
// 5. Geometry decoding helpers
// ============================================================================

/// Decode a feature's geometry when its kind is one of `kinds`.
///
/// Returns `Ok(None)` for a missing geometry, a geometry without a string
/// `type`, or a kind outside `kinds`.
fn decode_geometry(index: usize, feature: &JsonValue, kinds: &[&str]) -> Result<Option<Value>> {
    let Some(geometry) = feature.get("geometry").filter(|g| g.is_object()) else {
        return Ok(None);
    };
    let Some(kind) = geometry.get("type").and_then(JsonValue::as_str) else {
        return Ok(None);
    };
    if !kinds.contains(&kind) {
        return Ok(None);
    }

    let decoded = geojson::Geometry::from_json_value(geometry.clone()).map_err(|e| {
        GeoError::schema(format!("feature {}: invalid {} geometry: {}", index, kind, e))
    })?;
    Ok(Some(decoded.value))
}

/// First ring of a polygon, if it has enough vertices
fn outer_ring(index: usize, polygon: &[Vec<Vec<f64>>]) -> Result<Option<Polyline>> {
    let Some(ring) = polygon.first() else {
        return Ok(None);
    };
    let points = to_points(index, ring)?;
    if points.len() < MIN_RING_POINTS {
        return Ok(None);
    }
    Ok(Polyline::new(points))
}

/// Read positions as `[x, y, ...]`; extra dimensions are ignored.
fn to_points(index: usize, positions: &[Vec<f64>]) -> Result<Vec<Point2D>> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Point2D { x: *x, y: *y }),
            _ => Err(GeoError::schema(format!(
                "feature {}: coordinate has {} components, expected at least 2",
                index,
                position.len()
            ))),
        })
        .collect()
}
