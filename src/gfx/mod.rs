//! # Graphics Module
//!
//! Everything between the scene description and the pixels on screen.
//!
//! - **Camera** ([`camera`]) - orbit camera and its mouse controls
//! - **Geometry** ([`geometry`]) - procedural primitives and extruded text
//! - **Rendering** ([`rendering`]) - surface, pipelines and frame submission
//! - **Resources** ([`resources`]) - colors, materials, uniforms, render targets
//! - **Scene** ([`scene`]) - objects, lights and the material library
//!
//! ```no_run
//! use evergreen::{config::AppConfig, holiday::HolidayScene};
//!
//! let config = AppConfig::default();
//! let (scene, _panel_state) = HolidayScene::build(&config, None);
//! assert_eq!(scene.get_statistics().object_count, 3);
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::{RenderEngine, RenderSettings};
