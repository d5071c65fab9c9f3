//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`EVERGREEN_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the `config` directory next to the working directory
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        } else {
            log::debug!("No {} found, using built-in defaults", default_path.display());
        }

        if user_path.exists() {
            log::info!("Applying user overrides from {}", user_path.display());
            figment = figment.merge(Toml::file(&user_path));
        }

        // EVERGREEN_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("EVERGREEN_").split("__"));

        Ok(figment.extract()?)
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Merry Christmas".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
        }
    }
}

/// Camera and orbit control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial eye position
    pub position: [f32; 3],
    /// Point the camera orbits around
    pub target: [f32; 3],
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.01,
            far: 50.0,
            position: [0.0, 1.6, 3.0],
            target: [0.0, 1.6, 0.0],
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.01,
        }
    }
}

/// Scene colors and panel limits, colors as `0xRRGGBB`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background_color: u32,
    pub floor_color: u32,
    pub tree_color: u32,
    pub stump_color: u32,
    pub text_color: u32,
    /// Symmetric bound of the position sliders
    pub slider_range: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_color: 0xd2d2d2,
            floor_color: 0xd2d2d2,
            tree_color: 0x21a71c,
            stump_color: 0x2d2500,
            text_color: 0x147f10,
            slider_range: 1.75,
        }
    }
}

/// Floating text configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font file to use instead of the bundled DejaVu Sans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<String>,
    /// Glyph size in world units
    pub size: f32,
    /// Extrusion depth in world units
    pub depth: f32,
    /// Rasterization size in pixels; higher gives smoother letters
    pub pixel_resolution: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            size: 0.4,
            depth: 0.2,
            pixel_resolution: 96.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Use 4x MSAA when the adapter supports it
    pub antialias: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { antialias: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub show_panel: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { show_panel: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scene_constants() {
        let config = AppConfig::default();
        assert_eq!(config.scene.tree_color, 0x21a71c);
        assert_eq!(config.scene.stump_color, 0x2d2500);
        assert_eq!(config.scene.floor_color, 0xd2d2d2);
        assert_eq!(config.scene.slider_range, 1.75);
        assert_eq!(config.camera.fov_degrees, 50.0);
        assert_eq!(config.camera.position, [0.0, 1.6, 3.0]);
        assert_eq!(config.camera.target, [0.0, 1.6, 0.0]);
        assert!(config.render.antialias);
        assert_eq!(config.text.font_path, None);
        assert_eq!(config.text.pixel_resolution, 96.0);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("[scene]\ntree_color = 0xff0000\n"))
            .extract()
            .unwrap();

        assert_eq!(config.scene.tree_color, 0xff0000);
        assert_eq!(config.scene.stump_color, 0x2d2500);
        assert_eq!(config.window, WindowConfig::default());
    }
}
