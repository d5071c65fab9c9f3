// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Colors, materials, global uniforms and render targets.

pub mod color;
pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{Material, MaterialId, MaterialManager};
pub use texture_resource::TextureResource;
