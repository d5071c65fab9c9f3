//! # Procedural Geometry Generation
//!
//! Builds every mesh in the scene from code: the primitive shapes behind the
//! tree, stump and floor, and extruded text built from rasterized glyphs.
//!
//! ## Conventions
//!
//! - Y is up.
//! - Triangles wind counter-clockwise when seen from the side the normal
//!   points to.
//! - Shapes are centred on the origin unless stated otherwise.
//!
//! ## Usage
//!
//! ```rust
//! use evergreen::gfx::geometry::{generate_cone, generate_cylinder, generate_plane};
//!
//! let tree = generate_cone(0.5, 2.0, 32);
//! let stump = generate_cylinder(0.1, 0.1, 0.2, 32);
//! let floor = generate_plane(6.0, 4.0, 1, 1);
//! assert!(tree.triangle_count() > 0 && stump.triangle_count() > 0);
//! assert_eq!(floor.triangle_count(), 2);
//! ```

pub mod primitives;
pub mod text;

pub use primitives::*;
pub use text::{bundled_font, generate_text, load_font, TextGeometryOptions};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, `None` when there are no vertices
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.vertices.first()?;
        let bounds = self.vertices.iter().fold((first, first), |(mut min, mut max), v| {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
            (min, max)
        });
        Some(bounds)
    }

    pub fn translate(&mut self, offset: [f32; 3]) {
        for v in &mut self.vertices {
            v[0] += offset[0];
            v[1] += offset[1];
            v[2] += offset[2];
        }
    }

    /// Moves the geometry so its bounding box is centred on the origin
    pub fn center(&mut self) -> &mut Self {
        if let Some((min, max)) = self.bounding_box() {
            self.translate([
                -(min[0] + max[0]) * 0.5,
                -(min[1] + max[1]) * 0.5,
                -(min[2] + max[2]) * 0.5,
            ]);
        }
        self
    }

    /// Converts to the interleaved vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_moves_bounds_to_origin() {
        let mut data = generate_plane(2.0, 1.0, 1, 1);
        data.translate([3.0, -1.0, 0.5]);
        data.center();

        let (min, max) = data.bounding_box().unwrap();
        for axis in 0..3 {
            assert!((min[axis] + max[axis]).abs() < 1e-6);
        }
        assert!((max[0] - min[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn scene_format_pairs_positions_with_normals() {
        for data in [
            generate_cone(0.5, 2.0, 8),
            generate_cylinder(0.1, 0.1, 0.2, 8),
            generate_plane(6.0, 4.0, 1, 1),
        ] {
            assert_eq!(data.vertices.len(), data.normals.len());

            let (vertices, indices) = data.to_scene_format();
            assert_eq!(indices, data.indices);
            for (vertex, (position, normal)) in
                vertices.iter().zip(data.vertices.iter().zip(&data.normals))
            {
                assert_eq!(vertex.position, *position);
                assert_eq!(vertex.normal, *normal);
            }
        }
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        assert!(GeometryData::new().bounding_box().is_none());
    }
}
