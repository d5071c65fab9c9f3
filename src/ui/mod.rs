//! # User Interface Module
//!
//! Dear ImGui overlay for the viewer.
//!
//! - [`UiManager`] handles ImGui integration with winit and wgpu, input
//!   capture and frame timing.
//! - [`debug_panel`] draws the scene controls: three color pickers and the
//!   tree and stump position sliders.
//!
//! While ImGui wants the mouse or keyboard, camera input is ignored.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::debug_panel;
