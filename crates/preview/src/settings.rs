//! # Preview Settings
//!
//! The `preview.toml` config as a Bevy resource, plus the conversions from
//! plain config values (color arrays, key names) into Bevy types.
//!
//! ## Table of Contents
//! 1. PreviewSettings — config resource
//! 2. Key + color conversion

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use citytimeline_geo::{ConfigError, PipelineInputs, PreviewConfig};

/// Key used when `overlay.toggle_key` names nothing we recognize
pub const DEFAULT_TOGGLE_KEY: KeyCode = KeyCode::F8;

// ============================================================================
// 1. PreviewSettings — config resource
// ============================================================================

/// Loaded preview config and the directory its relative paths resolve against.
#[derive(Resource, Debug, Clone)]
pub struct PreviewSettings {
    pub config: PreviewConfig,
    pub base_dir: PathBuf,
    toggle_key: KeyCode,
}

impl PreviewSettings {
    pub fn new(config: PreviewConfig, base_dir: impl Into<PathBuf>) -> Self {
        let toggle_key = parse_key_code(&config.overlay.toggle_key).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown toggle key '{}', falling back to {:?}",
                config.overlay.toggle_key,
                DEFAULT_TOGGLE_KEY
            );
            DEFAULT_TOGGLE_KEY
        });
        Self {
            config,
            base_dir: base_dir.into(),
            toggle_key,
        }
    }

    /// Load `preview.toml`; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = PreviewConfig::load(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::new(config, base_dir))
    }

    pub fn pipeline_inputs(&self) -> PipelineInputs {
        self.config.pipeline_inputs(&self.base_dir)
    }

    pub fn toggle_key(&self) -> KeyCode {
        self.toggle_key
    }

    pub fn color(&self) -> Color {
        color_from_rgba(&self.config.overlay.color)
    }

    /// Whether the overlay color is translucent
    pub fn is_translucent(&self) -> bool {
        self.config.overlay.color.get(3).is_some_and(|&alpha| alpha < 1.0)
    }
}

// ============================================================================
// 2. Key + color conversion
// ============================================================================

/// Map a key name from config ("F8", "f8", "Backquote", "P") to a `KeyCode`
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let key = match name.trim().to_ascii_uppercase().as_str() {
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        "BACKQUOTE" | "`" => KeyCode::Backquote,
        "TAB" => KeyCode::Tab,
        "INSERT" => KeyCode::Insert,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "PAGEUP" => KeyCode::PageUp,
        "PAGEDOWN" => KeyCode::PageDown,
        "DELETE" => KeyCode::Delete,
        "G" => KeyCode::KeyG,
        "L" => KeyCode::KeyL,
        "O" => KeyCode::KeyO,
        "P" => KeyCode::KeyP,
        "V" => KeyCode::KeyV,
        "W" => KeyCode::KeyW,
        _ => return None,
    };
    Some(key)
}

/// RGBA color from a 3- or 4-component `[0, 1]` array
pub fn color_from_rgba(color: &[f32]) -> Color {
    match color {
        [r, g, b] => Color::srgba(*r, *g, *b, 1.0),
        [r, g, b, a] => Color::srgba(*r, *g, *b, *a),
        _ => Color::srgba(0.5, 0.5, 0.5, 1.0),
    }
}
