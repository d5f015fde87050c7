//! # CityTimeline Geo — Water-Network Preview Pipeline
//!
//! Reads projected GIS water-network data (GeoJSON lines and polygons in
//! EPSG:2230, US survey feet) and turns it into small, bounded sets of
//! polylines in local meters that a host renderer can draw as an overlay.
//!
//! ## Pipeline
//! ```text
//! GeoJSON file  →  Polylines (feet)  →  BoundingBox  →  LocalTransform  →  Samples (meters)
//!   importer          model               bounds          transform          sampling
//! ```
//!
//! ## Modules
//! - `model` — Point2D, Polyline, BoundingBox, GroupStats
//! - `importer` — FeatureCollection validation + line / outer-ring extraction
//! - `bounds` — Shared bounding box over one or more polyline groups
//! - `transform` — Translate-and-scale into local coordinates
//! - `sampling` — Truncate transformed geometry to fixed caps
//! - `config` — `preview.toml` parsing
//! - `pipeline` — One import → transform → sample run
//! - `error` — Error types
//!
//! ## Table of Contents
//! 1. Module declarations
//! 2. Re-exports

pub mod bounds;
pub mod config;
pub mod error;
pub mod importer;
pub mod model;
pub mod pipeline;
pub mod sampling;
pub mod transform;

pub use bounds::compute_bounding_box;
pub use config::PreviewConfig;
pub use error::{ConfigError, GeoError, Result};
pub use importer::{count_features, read_line_geometries, read_polygon_outer_rings, FeatureSource};
pub use model::{BoundingBox, GroupStats, Point2D, Polyline};
pub use pipeline::{run_pipeline, PipelineInputs, PreviewBuild};
pub use sampling::{select_samples, SampleLimits};
pub use transform::{build_transform, LocalTransform, METERS_PER_FOOT};
