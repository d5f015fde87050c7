//! # Bevy Plugin for the Water-Network Overlay
//!
//! Runs the geometry pipeline once per load, spawns one ribbon per sampled
//! polyline under a single root entity, and toggles that root's visibility
//! from the keyboard.
//!
//! ## Table of Contents
//! 1. WaterPreviewPlugin — Main plugin
//! 2. Components + load state
//! 3. Systems: build_water_preview, toggle_preview_visibility

use bevy::light::NotShadowCaster;
use bevy::prelude::*;
use std::path::Path;

use citytimeline_geo::{run_pipeline, Polyline};

use crate::render::polyline_ribbon;
use crate::settings::PreviewSettings;

// ============================================================================
// 1. WaterPreviewPlugin — Main plugin
// ============================================================================

/// Draws the water-network preview overlay.
///
/// Requires a `PreviewSettings` resource (insert it directly or via
/// `load_preview_settings`). Nothing happens until one exists.
pub struct WaterPreviewPlugin;

impl Plugin for WaterPreviewPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<PreviewLoadState>()
            .add_systems(Update, (
                build_water_preview.run_if(resource_exists::<PreviewSettings>.and(not(preview_built))),
                toggle_preview_visibility.run_if(resource_exists::<PreviewSettings>),
            ));
    }
}

// ============================================================================
// 2. Components + load state
// ============================================================================

/// Parent of every overlay polyline; its `Visibility` is what the toggle flips
#[derive(Component, Debug, Default)]
pub struct PreviewRoot;

/// Which input group a preview polyline was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Line,
    Area,
}

/// One drawn polyline
#[derive(Component, Debug, Clone)]
pub struct PreviewPolyline {
    /// Position in draw order
    pub index: usize,
    pub kind: SampleKind,
    /// Vertex count of the sampled polyline
    pub points: usize,
}

/// Run-once latch for the overlay build.
///
/// `built` is set after the first attempt whether it succeeded or not; call
/// [`PreviewLoadState::request_rebuild`] to run the pipeline again.
#[derive(Resource, Default, Debug)]
pub struct PreviewLoadState {
    pub built: bool,
    /// Current overlay root, replaced on rebuild
    pub root: Option<Entity>,
}

impl PreviewLoadState {
    pub fn request_rebuild(&mut self) {
        self.built = false;
    }
}

/// Pulls overlay fragments toward the camera so terrain below never hides them
pub const OVERLAY_DEPTH_BIAS: f32 = 1.0e6;

/// Run condition: overlay already attempted
fn preview_built(state: Res<PreviewLoadState>) -> bool {
    state.built
}

/// Load `preview.toml` and insert the `PreviewSettings` resource.
pub fn load_preview_settings(path: &Path, commands: &mut Commands) -> Result<(), String> {
    let settings = PreviewSettings::load(path).map_err(|e| format!("{}", e))?;
    commands.insert_resource(settings);
    tracing::info!("Loaded preview config from {}", path.display());
    Ok(())
}

// ============================================================================
// 3. Systems
// ============================================================================

/// System: run the pipeline and spawn the overlay.
///
/// Pipeline errors are logged and end the attempt; the host keeps running.
fn build_water_preview(
    mut commands: Commands,
    settings: Res<PreviewSettings>,
    mut load_state: ResMut<PreviewLoadState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    load_state.built = true;

    let build = match run_pipeline(&settings.pipeline_inputs()) {
        Ok(build) => build,
        Err(e) => {
            tracing::error!("Water preview aborted: {}", e);
            return;
        }
    };

    if let Some(old_root) = load_state.root.take() {
        commands.entity(old_root).despawn();
    }

    let overlay = &settings.config.overlay;
    let material = materials.add(StandardMaterial {
        base_color: settings.color(),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        depth_bias: OVERLAY_DEPTH_BIAS,
        alpha_mode: if settings.is_translucent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    });

    let root = commands.spawn((
        Name::new("Water Network Preview"),
        PreviewRoot,
        Transform::IDENTITY,
        Visibility::Visible,
    )).id();

    let polylines = build.samples.iter().map(|p| (SampleKind::Line, p))
        .chain(build.area_samples.iter().map(|p| (SampleKind::Area, p)));

    let mut placed = 0;
    for (index, (kind, polyline)) in polylines.enumerate() {
        spawn_polyline(&mut commands, &mut meshes, &material, root, index, kind, polyline, overlay.height_offset, overlay.line_width);
        placed += 1;
    }

    load_state.root = Some(root);
    tracing::info!("Placed {} preview polylines in scene", placed);
}

#[allow(clippy::too_many_arguments)]
fn spawn_polyline(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &Handle<StandardMaterial>,
    root: Entity,
    index: usize,
    kind: SampleKind,
    polyline: &Polyline,
    height: f32,
    width: f32,
) {
    let mesh = meshes.add(polyline_ribbon(polyline, height, width));

    commands.spawn((
        Name::new(format!("Polyline {:04}", index)),
        Mesh3d(mesh),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        NotShadowCaster,
        PreviewPolyline {
            index,
            kind,
            points: polyline.len(),
        },
        ChildOf(root),
    ));
}

/// System: show/hide the overlay on the configured key
fn toggle_preview_visibility(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    settings: Res<PreviewSettings>,
    mut roots: Query<&mut Visibility, With<PreviewRoot>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    let key = settings.toggle_key();
    if !keyboard.just_pressed(key) {
        return;
    }

    for mut visibility in roots.iter_mut() {
        let show = *visibility == Visibility::Hidden;
        *visibility = if show { Visibility::Visible } else { Visibility::Hidden };
        tracing::info!("Preview {} (key {:?})", if show { "shown" } else { "hidden" }, key);
    }
}
