//! # Preview Configuration
//!
//! Parses `preview.toml`, the declarative config for one water-network
//! preview: input files, unit scale, sampling caps and overlay style.
//! Relative paths resolve against the directory holding the config file.
//!
//! ```toml
//! [sources]
//! lines = "networks/water_lines_2230_simplified.geojson"
//! areas = "networks/water_areas_2230_simplified.geojson"
//!
//! [transform]
//! scale = 0.3048
//!
//! [sampling]
//! max_polylines = 20
//! max_points_per_line = 1000
//!
//! [overlay]
//! height_offset = 800.0
//! line_width = 18.0
//! color = [0.0, 0.9, 1.0, 0.92]
//! toggle_key = "F8"
//! ```
//!
//! ## Table of Contents
//! 1. PreviewConfig — Top-level config
//! 2. Section configs
//! 3. Parsing + validation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::pipeline::PipelineInputs;
use crate::sampling::SampleLimits;
use crate::transform::METERS_PER_FOOT;

// ============================================================================
// 1. PreviewConfig — Top-level config
// ============================================================================

/// Top-level preview configuration, parsed from `preview.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Input GeoJSON files
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Source → local unit conversion
    #[serde(default)]
    pub transform: TransformConfig,
    /// Caps on geometry handed to the renderer
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Overlay drawing style (read by the renderer adapter)
    #[serde(default)]
    pub overlay: OverlayConfig,
}

// ============================================================================
// 2. Section configs
// ============================================================================

/// Input file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Water lines (LineString / MultiLineString features)
    #[serde(default = "default_lines")]
    pub lines: PathBuf,
    /// Water areas (Polygon / MultiPolygon features); only widens the shared box
    /// unless `sampling.include_areas` is set
    #[serde(default)]
    pub areas: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            lines: default_lines(),
            areas: Some(PathBuf::from("networks/water_areas_2230_simplified.geojson")),
        }
    }
}

fn default_lines() -> PathBuf {
    PathBuf::from("networks/water_lines_2230_simplified.geojson")
}

/// Unit conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Source linear unit → local meters (EPSG:2230 feet by default)
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self { scale: default_scale() }
    }
}

fn default_scale() -> f64 { METERS_PER_FOOT }

/// Sampling caps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(flatten)]
    pub limits: SampleLimits,
    /// Also sample the area outer rings
    #[serde(default)]
    pub include_areas: bool,
}

/// Overlay style, in local meters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Height of the overlay above the ground plane
    #[serde(default = "default_height_offset")]
    pub height_offset: f32,
    /// Ribbon width
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    /// RGBA color [r, g, b] or [r, g, b, a] in 0.0–1.0 range
    #[serde(default = "default_color")]
    pub color: Vec<f32>,
    /// Key that shows/hides the overlay
    #[serde(default = "default_toggle_key")]
    pub toggle_key: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            height_offset: default_height_offset(),
            line_width: default_line_width(),
            color: default_color(),
            toggle_key: default_toggle_key(),
        }
    }
}

fn default_height_offset() -> f32 { 800.0 }
fn default_line_width() -> f32 { 18.0 }
fn default_color() -> Vec<f32> { vec![0.0, 0.9, 1.0, 0.92] }
fn default_toggle_key() -> String { "F8".to_string() }

// ============================================================================
// 3. Parsing + validation
// ============================================================================

impl PreviewConfig {
    /// Load and validate a config from a `preview.toml` path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PreviewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.transform.scale;
        if !scale.is_finite() || scale == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "transform.scale must be finite and non-zero, got {}",
                scale
            )));
        }
        let width = self.overlay.line_width;
        if width.is_nan() || width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "overlay.line_width must be positive, got {}",
                width
            )));
        }
        if !matches!(self.overlay.color.len(), 3 | 4) {
            return Err(ConfigError::Invalid(format!(
                "overlay.color needs 3 or 4 components, got {}",
                self.overlay.color.len()
            )));
        }
        Ok(())
    }

    /// Resolve a config-relative path; absolute paths pass through
    pub fn resolve_path(config_dir: &Path, relative: &Path) -> PathBuf {
        config_dir.join(relative)
    }

    /// Pipeline inputs with paths resolved against `config_dir`
    pub fn pipeline_inputs(&self, config_dir: &Path) -> PipelineInputs {
        PipelineInputs {
            lines_path: Self::resolve_path(config_dir, &self.sources.lines),
            areas_path: self
                .sources
                .areas
                .as_deref()
                .map(|areas| Self::resolve_path(config_dir, areas)),
            scale: self.transform.scale,
            limits: self.sampling.limits,
            include_areas: self.sampling.include_areas,
        }
    }
}
