// src/lib.rs
//! Evergreen
//!
//! A holiday scene viewer built on wgpu and winit: a cone tree on a stump,
//! a floor, two lines of floating 3D text and an ImGui debug panel.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod holiday;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::EvergreenApp;
pub use config::AppConfig;
pub use error::{EvergreenError, Result};
