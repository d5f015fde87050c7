//! # Preview Pipeline
//!
//! One full import → bounds → transform → sample run over a lines file and an
//! optional areas file. The run reads its inputs, logs what it finds, and
//! returns plain data; it keeps no state between calls, so "run once per
//! process" is the caller's decision.
//!
//! ## Table of Contents
//! 1. PipelineInputs — what a run needs
//! 2. PreviewBuild — what a run produces
//! 3. run_pipeline

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::bounds::compute_bounding_box;
use crate::error::{GeoError, Result};
use crate::importer::FeatureSource;
use crate::model::{BoundingBox, GroupStats, Polyline};
use crate::sampling::SampleLimits;
use crate::transform::{LocalTransform, METERS_PER_FOOT};

// ============================================================================
// 1. PipelineInputs — what a run needs
// ============================================================================

/// Resolved inputs for a single run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInputs {
    /// LineString / MultiLineString source
    pub lines_path: PathBuf,
    /// Polygon / MultiPolygon source
    pub areas_path: Option<PathBuf>,
    /// Source unit → local meters
    pub scale: f64,
    pub limits: SampleLimits,
    /// Also sample area outer rings into [`PreviewBuild::area_samples`]
    pub include_areas: bool,
}

impl PipelineInputs {
    /// Inputs with default scale and limits
    pub fn new(lines_path: impl Into<PathBuf>) -> Self {
        Self {
            lines_path: lines_path.into(),
            areas_path: None,
            scale: METERS_PER_FOOT,
            limits: SampleLimits::default(),
            include_areas: false,
        }
    }

    pub fn with_areas(mut self, areas_path: impl Into<PathBuf>) -> Self {
        self.areas_path = Some(areas_path.into());
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_limits(mut self, limits: SampleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_area_samples(mut self, include_areas: bool) -> Self {
        self.include_areas = include_areas;
        self
    }
}

// ============================================================================
// 2. PreviewBuild — what a run produces
// ============================================================================

/// Result of one pipeline run. Sample coordinates are local meters.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewBuild {
    pub line_features: usize,
    pub area_features: usize,
    pub line_stats: GroupStats,
    pub area_stats: GroupStats,
    /// Shared box over lines and areas, in source units
    pub bounds: BoundingBox,
    pub transform: LocalTransform,
    /// Sampled line parts
    pub samples: Vec<Polyline>,
    /// Sampled area outer rings; empty unless requested
    pub area_samples: Vec<Polyline>,
}

impl PreviewBuild {
    /// Total number of polylines handed to the renderer
    pub fn polyline_count(&self) -> usize {
        self.samples.len() + self.area_samples.len()
    }
}

// ============================================================================
// 3. run_pipeline
// ============================================================================

/// Run the pipeline once.
///
/// Fails with `NotFound` when an input is missing, `Parse`/`Schema` for bad
/// content, and `EmptyInput` when neither file yields a coordinate.
pub fn run_pipeline(inputs: &PipelineInputs) -> Result<PreviewBuild> {
    let lines_path = inputs.lines_path.as_path();
    let areas_path = inputs.areas_path.as_deref();

    log_input("Lines", lines_path)?;
    if let Some(path) = areas_path {
        log_input("Areas", path)?;
    }

    let lines_source = FeatureSource::from_path(lines_path)?;
    let areas_source = areas_path.map(FeatureSource::from_path).transpose()?;

    let line_features = lines_source.feature_count();
    let area_features = areas_source.as_ref().map_or(0, FeatureSource::feature_count);
    tracing::info!(
        "Loaded OK. Water lines features: {}, water areas features: {}",
        line_features,
        area_features
    );

    let lines = lines_source.line_geometries()?;
    let areas = match &areas_source {
        Some(source) => source.polygon_outer_rings()?,
        None => Vec::new(),
    };

    let line_stats = GroupStats::of(&lines);
    let area_stats = GroupStats::of(&areas);
    tracing::info!("Parsed {} line parts ({} pts)", line_stats.parts, line_stats.points);
    tracing::info!("Parsed {} area rings ({} pts)", area_stats.parts, area_stats.points);

    if line_stats.points == 0 && area_stats.points == 0 {
        tracing::warn!(
            "No coordinates parsed; expected LineString/MultiLineString and Polygon/MultiPolygon features"
        );
        return Err(GeoError::EmptyInput);
    }

    let bounds = compute_bounding_box(&[&lines, &areas])?;
    tracing::info!(
        "Bounds min=({:.2}, {:.2}) max=({:.2}, {:.2}) size=({:.2} x {:.2})",
        bounds.min.x,
        bounds.min.y,
        bounds.max.x,
        bounds.max.y,
        bounds.width(),
        bounds.height()
    );

    let transform = LocalTransform::from_bounding_box(&bounds, inputs.scale);
    tracing::info!("Transform scale={} (1 world unit = 1 meter)", inputs.scale);

    let samples = inputs.limits.apply(&lines, &transform);
    let area_samples = if inputs.include_areas {
        inputs.limits.apply(&areas, &transform)
    } else {
        Vec::new()
    };
    tracing::info!(
        "Built {} line samples and {} area samples (caps: {} polylines, {} pts each)",
        samples.len(),
        area_samples.len(),
        inputs.limits.max_polylines,
        inputs.limits.max_points_per_line
    );

    Ok(PreviewBuild {
        line_features,
        area_features,
        line_stats,
        area_stats,
        bounds,
        transform,
        samples,
        area_samples,
    })
}

/// Check an input exists and log its size
fn log_input(label: &str, path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| GeoError::from_io(path, e))?;
    tracing::info!("{}: {} ({} bytes)", label, path.display(), metadata.len());
    Ok(())
}
