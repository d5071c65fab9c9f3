//! # Scene Management Module
//!
//! Objects, materials, lights and the camera that make up a renderable scene.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container for the camera, objects, materials and lighting
//! - [`Object`] - Meshes with a transform and a material reference
//! - [`Transform`] - Position, XYZ Euler rotation and uniform scale
//! - [`Lighting`] - Hemisphere and directional light plus background color
//! - [`Vertex3D`] - Position and normal vertex format
//!
//! Everything here can be built and edited without a GPU; GPU buffers are
//! created later by [`Scene::init_gpu_resources`] and kept in sync by
//! [`Scene::sync_gpu`].

pub mod lighting;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use lighting::{DirectionalLight, HemisphereLight, Lighting};
pub use object::{DrawObject, Mesh, Object, Transform};
pub use scene::{Scene, SceneLayouts, SceneStatistics};
pub use vertex::Vertex3D;
