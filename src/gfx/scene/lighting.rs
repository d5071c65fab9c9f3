//! Scene lighting: one hemisphere light, one directional light and the
//! background color. Colors are sRGB; conversion to linear happens when the
//! global uniform is written.

use cgmath::{InnerSpace, Vector3};

use crate::gfx::resources::color::hex_to_srgb;

/// Ambient light blended from `ground_color` (normal pointing down) to
/// `sky_color` (normal pointing up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub intensity: f32,
}

impl HemisphereLight {
    pub fn new(sky: u32, ground: u32, intensity: f32) -> Self {
        Self {
            sky_color: hex_to_srgb(sky),
            ground_color: hex_to_srgb(ground),
            intensity,
        }
    }
}

/// Light arriving from `position` towards `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(color: u32, intensity: f32) -> Self {
        Self {
            position: [0.0, 1.0, 0.0],
            target: [0.0, 0.0, 0.0],
            color: hex_to_srgb(color),
            intensity,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Unit vector pointing from the surface towards the light
    pub fn direction_to_light(&self) -> [f32; 3] {
        let offset = Vector3::from(self.position) - Vector3::from(self.target);
        if offset.magnitude2() <= f32::EPSILON {
            return [0.0, 1.0, 0.0];
        }
        offset.normalize().into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub hemisphere: HemisphereLight,
    pub directional: DirectionalLight,
    /// Clear color behind the scene
    pub background: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            hemisphere: HemisphereLight::new(0xffffff, 0x444444, 1.0),
            directional: DirectionalLight::new(0xffffff, 1.0),
            background: [0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overhead_light_points_up() {
        let light = DirectionalLight::new(0xffffff, 0.5).with_position(0.0, 4.0, 0.0);
        assert_eq!(light.direction_to_light(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn degenerate_light_falls_back_to_up() {
        let light = DirectionalLight::new(0xffffff, 0.5).with_position(0.0, 0.0, 0.0);
        assert_eq!(light.direction_to_light(), [0.0, 1.0, 0.0]);
    }
}
