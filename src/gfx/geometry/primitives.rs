//! # Primitive Shape Generation
//!
//! Cylinders, cones and planes with per-vertex normals, plus the boxes
//! extruded text is made of.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a Y-aligned cylinder (or truncated cone) centred on the origin
///
/// # Arguments
/// * `radius_top` - Radius of the ring at `+height/2`
/// * `radius_bottom` - Radius of the ring at `-height/2`
/// * `height` - Extent along Y
/// * `radial_segments` - Number of segments around the axis
///
/// Side normals follow the slant of the surface. A cap is emitted only for a
/// ring with a non-zero radius, so a zero top radius gives a cone.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = radial_segments.max(3);
    let half_height = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    // Side rings: row 0 is the top ring, row 1 the bottom ring
    for (y, radius) in [(half_height, radius_top), (-half_height, radius_bottom)] {
        for i in 0..=segs {
            let theta = i as f32 / segs as f32 * 2.0 * PI;
            let (sin_t, cos_t) = theta.sin_cos();

            data.vertices.push([radius * sin_t, y, radius * cos_t]);
            data.normals.push(normalize([sin_t, slope, cos_t]));
        }
    }

    let ring = segs + 1;
    for i in 0..segs {
        let top = i;
        let top_next = i + 1;
        let bottom = ring + i;
        let bottom_next = ring + i + 1;

        data.indices
            .extend_from_slice(&[bottom, bottom_next, top_next, bottom, top_next, top]);
    }

    if radius_top > 0.0 {
        push_cap(&mut data, radius_top, half_height, segs, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut data, radius_bottom, -half_height, segs, false);
    }

    data
}

/// Generate a Y-aligned cone centred on the origin, apex at `+height/2`
pub fn generate_cone(radius: f32, height: f32, radial_segments: u32) -> GeometryData {
    generate_cylinder(0.0, radius, height, radial_segments)
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Rotate by -90 degrees around X to lay it flat as a floor.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    // Rows run from the top edge (+Y) down
    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;
        let pos_y = (0.5 - v) * height;

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, pos_y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
        }
    }

    let row = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = iy * row + ix;
            let b = a + row;
            let c = b + 1;
            let d = a + 1;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Appends an axis-aligned box spanning `min..max` with flat face normals
///
/// Every box adds 24 vertices (4 per face) and 36 indices.
pub fn push_box(data: &mut GeometryData, min: [f32; 3], max: [f32; 3]) {
    // (normal axis, sign, u axis, v axis) with u x v pointing along the normal
    const FACES: [(usize, f32, usize, usize); 6] = [
        (0, 1.0, 1, 2),
        (0, -1.0, 2, 1),
        (1, 1.0, 2, 0),
        (1, -1.0, 0, 2),
        (2, 1.0, 0, 1),
        (2, -1.0, 1, 0),
    ];
    const CORNERS: [(bool, bool); 4] = [(false, false), (true, false), (true, true), (false, true)];

    for (axis, sign, u_axis, v_axis) in FACES {
        let base = data.vertices.len() as u32;
        let mut normal = [0.0; 3];
        normal[axis] = sign;

        for (u_high, v_high) in CORNERS {
            let mut position = [0.0; 3];
            position[axis] = if sign > 0.0 { max[axis] } else { min[axis] };
            position[u_axis] = if u_high { max[u_axis] } else { min[u_axis] };
            position[v_axis] = if v_high { max[v_axis] } else { min[v_axis] };

            data.vertices.push(position);
            data.normals.push(normal);
        }

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segs: u32, top: bool) {
    let normal_y = if top { 1.0 } else { -1.0 };

    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push([0.0, normal_y, 0.0]);

    let ring_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let theta = i as f32 / segs as f32 * 2.0 * PI;
        let (sin_t, cos_t) = theta.sin_cos();

        data.vertices.push([radius * sin_t, y, radius * cos_t]);
        data.normals.push([0.0, normal_y, 0.0]);
    }

    for i in 0..segs {
        let current = ring_start + i;
        let next = current + 1;
        if top {
            data.indices.extend_from_slice(&[center, current, next]);
        } else {
            data.indices.extend_from_slice(&[center, next, current]);
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every non-degenerate triangle faces the same way as its vertex normals
    fn assert_outward_winding(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| data.vertices[i as usize]);
            let face = cross(sub(b, a), sub(c, a));
            if dot(face, face) < 1e-12 {
                continue;
            }
            let normal = data.normals[tri[0] as usize];
            assert!(dot(face, normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn cylinder_counts_and_extents() {
        let cylinder = generate_cylinder(0.1, 0.1, 0.2, 32);
        // two side rings + two caps (center + ring)
        assert_eq!(cylinder.vertex_count(), 2 * 33 + 2 * (1 + 33));
        assert_eq!(cylinder.triangle_count(), 32 * 2 + 32 * 2);
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());

        let (min, max) = cylinder.bounding_box().unwrap();
        assert!((max[1] - 0.1).abs() < 1e-6 && (min[1] + 0.1).abs() < 1e-6);
        assert!((max[0] - 0.1).abs() < 1e-4);
        assert_outward_winding(&cylinder);
    }

    #[test]
    fn cone_has_apex_on_top_and_no_top_cap() {
        let cone = generate_cone(0.5, 2.0, 32);
        assert_eq!(cone.vertex_count(), 2 * 33 + (1 + 33));

        let (min, max) = cone.bounding_box().unwrap();
        assert!((max[1] - 1.0).abs() < 1e-6);
        assert!((min[1] + 1.0).abs() < 1e-6);
        for i in 0..=32 {
            let apex = cone.vertices[i];
            assert_eq!([apex[0], apex[2]], [0.0, 0.0]);
        }
        assert_outward_winding(&cone);
    }

    #[test]
    fn cone_side_normals_tilt_upward() {
        let cone = generate_cone(0.5, 2.0, 16);
        for normal in &cone.normals[..17] {
            assert!(normal[1] > 0.0);
            assert!((dot(*normal, *normal) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn plane_faces_positive_z() {
        let plane = generate_plane(6.0, 4.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9);
        assert_eq!(plane.indices.len(), 24);

        let (min, max) = plane.bounding_box().unwrap();
        assert_eq!((min[0], max[0]), (-3.0, 3.0));
        assert_eq!((min[1], max[1]), (-2.0, 2.0));
        assert_outward_winding(&plane);
    }

    #[test]
    fn box_faces_point_outward() {
        let mut data = GeometryData::new();
        push_box(&mut data, [0.0, 0.0, 0.0], [1.0, 2.0, 3.0]);

        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.indices.len(), 36);
        assert_eq!(data.bounding_box(), Some(([0.0, 0.0, 0.0], [1.0, 2.0, 3.0])));
        assert_outward_winding(&data);
    }
}
