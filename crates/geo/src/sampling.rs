//! # Preview Sampling
//!
//! Bounds how much geometry reaches the renderer: at most `max_polylines`
//! polylines, each cut down to its first `max_points_per_line` points, all
//! mapped through a [`LocalTransform`].

use serde::{Deserialize, Serialize};

use crate::model::Polyline;
use crate::transform::LocalTransform;

/// Caps applied by [`select_samples`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleLimits {
    #[serde(default = "default_max_polylines")]
    pub max_polylines: usize,
    #[serde(default = "default_max_points_per_line")]
    pub max_points_per_line: usize,
}

fn default_max_polylines() -> usize { 20 }
fn default_max_points_per_line() -> usize { 1000 }

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            max_polylines: default_max_polylines(),
            max_points_per_line: default_max_points_per_line(),
        }
    }
}

/// Transform and truncate `polylines`, in input order.
///
/// Each polyline keeps its first `max_points_per_line` points and is dropped
/// if fewer than two remain. Stops once `max_polylines` have been accepted.
pub fn select_samples(
    polylines: &[Polyline],
    transform: &LocalTransform,
    max_polylines: usize,
    max_points_per_line: usize,
) -> Vec<Polyline> {
    if max_polylines == 0 {
        return Vec::new();
    }

    let mut samples = Vec::with_capacity(max_polylines.min(polylines.len()));
    for polyline in polylines {
        let points = polyline
            .iter()
            .take(max_points_per_line)
            .map(|&p| transform.to_local(p))
            .collect();

        if let Some(sample) = Polyline::new(points) {
            samples.push(sample);
            if samples.len() >= max_polylines {
                break;
            }
        }
    }
    samples
}

impl SampleLimits {
    /// [`select_samples`] with these caps
    pub fn apply(&self, polylines: &[Polyline], transform: &LocalTransform) -> Vec<Polyline> {
        select_samples(polylines, transform, self.max_polylines, self.max_points_per_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point2D;

    fn line(points: &[(f64, f64)]) -> Polyline {
        Polyline::from_xy(points).unwrap()
    }

    fn fixture() -> Vec<Polyline> {
        vec![
            line(&[(10.0, 10.0), (20.0, 10.0), (30.0, 10.0), (40.0, 10.0)]),
            line(&[(10.0, 20.0), (10.0, 30.0)]),
            line(&[(50.0, 50.0), (60.0, 60.0), (70.0, 70.0)]),
        ]
    }

    #[test]
    fn test_points_are_transformed_in_order() {
        let tf = LocalTransform::new(10.0, 10.0, 0.5);
        let samples = select_samples(&fixture(), &tf, 10, 10);

        assert_eq!(samples.len(), 3);
        for (sample, source) in samples.iter().zip(fixture().iter()) {
            assert_eq!(sample.len(), source.len());
            for (out, input) in sample.iter().zip(source.iter()) {
                assert_eq!(*out, tf.to_local(*input));
            }
        }
        assert_eq!(samples[0].last(), Point2D { x: 15.0, y: 0.0 });
    }

    #[test]
    fn test_point_cap_keeps_prefix() {
        let tf = LocalTransform::new(0.0, 0.0, 1.0);
        let samples = select_samples(&fixture(), &tf, 10, 2);

        assert!(samples.iter().all(|s| s.len() == 2));
        assert_eq!(samples[0].points(), &[Point2D { x: 10.0, y: 10.0 }, Point2D { x: 20.0, y: 10.0 }]);
    }

    #[test]
    fn test_point_cap_below_two_drops_everything() {
        let tf = LocalTransform::new(0.0, 0.0, 1.0);
        assert!(select_samples(&fixture(), &tf, 10, 1).is_empty());
        assert!(select_samples(&fixture(), &tf, 10, 0).is_empty());
    }

    #[test]
    fn test_polyline_cap() {
        let tf = LocalTransform::new(0.0, 0.0, 1.0);
        let samples = select_samples(&fixture(), &tf, 2, 100);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].first(), Point2D { x: 10.0, y: 20.0 });

        assert!(select_samples(&fixture(), &tf, 0, 100).is_empty());
    }

    #[test]
    fn test_limits_apply() {
        let tf = LocalTransform::new(0.0, 0.0, 1.0);
        let limits = SampleLimits { max_polylines: 1, max_points_per_line: 3 };
        let samples = limits.apply(&fixture(), &tf);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].len(), 3);

        assert_eq!(SampleLimits::default(), SampleLimits { max_polylines: 20, max_points_per_line: 1000 });
    }
}
