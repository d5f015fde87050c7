//! # Bounding Box
//!
//! Minimal axis-aligned box over one or more polyline groups. Callers pass
//! the line group and the area group together so a single box anchors both.

use crate::error::{GeoError, Result};
use crate::model::{BoundingBox, Point2D, Polyline};

/// Scan every point of every polyline in every group.
///
/// Empty groups are skipped. Fails with [`GeoError::EmptyInput`] when no
/// point was seen at all; there is no default box.
pub fn compute_bounding_box<G: AsRef<[Polyline]>>(groups: &[G]) -> Result<BoundingBox> {
    let mut min = Point2D { x: f64::INFINITY, y: f64::INFINITY };
    let mut max = Point2D { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY };
    let mut seen = false;

    for point in groups.iter().flat_map(|group| group.as_ref().iter()).flat_map(Polyline::iter) {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
        seen = true;
    }

    if !seen {
        return Err(GeoError::EmptyInput);
    }
    Ok(BoundingBox::new(min, max))
}

impl BoundingBox {
    /// Box over a single polyline group
    pub fn from_polylines(polylines: &[Polyline]) -> Result<Self> {
        compute_bounding_box(&[polylines])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Polyline {
        Polyline::from_xy(points).unwrap()
    }

    #[test]
    fn test_box_spans_both_groups() {
        let lines = vec![line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])];
        let areas = vec![line(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 0.0)])];

        let bbox = compute_bounding_box(&[&lines, &areas]).unwrap();
        assert_eq!(bbox.min, Point2D { x: 0.0, y: 0.0 });
        assert_eq!(bbox.max, Point2D { x: 20.0, y: 20.0 });
    }

    #[test]
    fn test_box_is_tight() {
        let lines = vec![
            line(&[(6_100_000.5, 2_180_000.0), (6_100_250.0, 2_179_900.25)]),
            line(&[(6_099_800.0, 2_180_400.0), (6_100_010.0, 2_180_020.0)]),
        ];
        let bbox = BoundingBox::from_polylines(&lines).unwrap();

        for p in lines.iter().flat_map(Polyline::iter) {
            assert!(bbox.contains(*p));
        }
        let all: Vec<Point2D> = lines.iter().flat_map(|l| l.iter().copied()).collect();
        assert!(all.iter().any(|p| p.x == bbox.min.x));
        assert!(all.iter().any(|p| p.x == bbox.max.x));
        assert!(all.iter().any(|p| p.y == bbox.min.y));
        assert!(all.iter().any(|p| p.y == bbox.max.y));
        assert_eq!(bbox.width(), 450.0);
        assert_eq!(bbox.height(), 499.75);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let lines: Vec<Polyline> = Vec::new();
        let areas = vec![line(&[(-3.0, 4.0), (5.0, -6.0)])];

        let bbox = compute_bounding_box(&[&lines, &areas]).unwrap();
        assert_eq!(bbox.min, Point2D { x: -3.0, y: -6.0 });
        assert_eq!(bbox.max, Point2D { x: 5.0, y: 4.0 });
    }

    #[test]
    fn test_no_points_is_an_error() {
        let empty: Vec<Polyline> = Vec::new();
        assert!(matches!(
            compute_bounding_box::<&[Polyline]>(&[]),
            Err(GeoError::EmptyInput)
        ));
        assert!(matches!(compute_bounding_box(&[&empty, &empty]), Err(GeoError::EmptyInput)));
        assert!(matches!(BoundingBox::from_polylines(&empty), Err(GeoError::EmptyInput)));
    }

    #[test]
    fn test_degenerate_axis() {
        let lines = vec![line(&[(2.0, 7.0), (9.0, 7.0)])];
        let bbox = BoundingBox::from_polylines(&lines).unwrap();
        assert_eq!(bbox.height(), 0.0);
        assert_eq!(bbox.width(), 7.0);
    }
}
