//! # CityTimeline Preview — Water-Network Overlay for Bevy
//!
//! Host-side adapter around `citytimeline-geo`: loads `preview.toml`, runs the
//! geometry pipeline once, and draws the sampled polylines as flat ribbons
//! floating above the scene. A key (F8 by default) shows and hides them.
//!
//! ## Modules
//! - `settings` — `PreviewSettings` resource, key + color conversion
//! - `render` — Local-meter polyline → mitered ribbon mesh
//! - `plugin` — Bevy plugin, run-once latch, build + toggle systems
//!
//! ## Usage
//! ```ignore
//! App::new()
//!     .add_plugins((DefaultPlugins, WaterPreviewPlugin))
//!     .add_systems(Startup, |mut commands: Commands| {
//!         if let Err(e) = load_preview_settings(Path::new("mods/irvine/preview.toml"), &mut commands) {
//!             tracing::error!("{}", e);
//!         }
//!     })
//!     .run();
//! ```

pub mod plugin;
pub mod render;
pub mod settings;

pub use plugin::{load_preview_settings, PreviewLoadState, PreviewPolyline, PreviewRoot, SampleKind, WaterPreviewPlugin};
pub use settings::PreviewSettings;
