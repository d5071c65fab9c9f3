//! Global uniform bindings for camera and scene lighting
//!
//! Bound to slot 0 in every render pipeline.

use super::color::srgb_to_linear;
use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::lighting::Lighting},
    wgpu_utils::{
        binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
        UniformBuffer,
    },
};

/// Global uniform buffer content
///
/// Every light field is a vec4 so the layout matches `Globals` in
/// `standard.wgsl` without implicit padding. Colors are linear.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    /// rgb: sky color, a: hemisphere intensity
    sky_color: [f32; 4],
    /// rgb: ground color, a: 1.0 when the shader must encode sRGB itself
    ground_color: [f32; 4],
    /// xyz: unit vector towards the light, w: intensity
    light_direction: [f32; 4],
    /// rgb: light color, a: unused
    light_color: [f32; 4],
}
// 16 + 64 + 4 * 16 = 144 bytes

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, lighting: &Lighting, encode_srgb: bool) -> Self {
        let hemisphere = &lighting.hemisphere;
        let directional = &lighting.directional;
        let [sky_r, sky_g, sky_b] = srgb_to_linear(hemisphere.sky_color);
        let [ground_r, ground_g, ground_b] = srgb_to_linear(hemisphere.ground_color);
        let [dir_x, dir_y, dir_z] = directional.direction_to_light();
        let [light_r, light_g, light_b] = srgb_to_linear(directional.color);

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            sky_color: [sky_r, sky_g, sky_b, hemisphere.intensity],
            ground_color: [
                ground_r,
                ground_g,
                ground_b,
                if encode_srgb { 1.0 } else { 0.0 },
            ],
            light_direction: [dir_x, dir_y, dir_z, directional.intensity],
            light_color: [light_r, light_g, light_b, 0.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes camera and lighting for the coming frame
///
/// # Arguments
/// * `ubo` - The global uniform buffer to update
/// * `queue` - WGPU command queue for buffer updates
/// * `camera` - Updated camera uniform data
/// * `lighting` - Scene lights
/// * `encode_srgb` - Whether the surface format lacks hardware sRGB encoding
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &Lighting,
    encode_srgb: bool,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lighting, encode_srgb));
}

/// Bind group layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform_for::<GlobalUBOContent>())
            .create(device, "Globals Bind Group Layout");
        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that read the global uniforms
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::lighting::{DirectionalLight, HemisphereLight};

    #[test]
    fn content_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 144);
    }

    #[test]
    fn lighting_is_packed_linear() {
        let lighting = Lighting {
            hemisphere: HemisphereLight::new(0xffffff, 0x000000, 0.75),
            directional: DirectionalLight::new(0xffffff, 0.5).with_position(0.0, 4.0, 0.0),
            background: [0.0; 3],
        };
        let content = GlobalUBOContent::new(CameraUniform::default(), &lighting, true);

        assert!((content.sky_color[0] - 1.0).abs() < 1e-6);
        assert_eq!(content.sky_color[3], 0.75);
        assert_eq!(content.ground_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(content.light_direction, [0.0, 1.0, 0.0, 0.5]);

        let content = GlobalUBOContent::new(CameraUniform::default(), &lighting, false);
        assert_eq!(content.ground_color[3], 0.0);
    }
}
