// src/wgpu_utils/mod.rs
//! Small wgpu helpers shared by the scene and the renderer
//!
//! Layouts are built once per binding slot, bind groups are filled in the
//! same order, and uniform buffers are typed by the `Pod` struct they hold.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
