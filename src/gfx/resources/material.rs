//! Material system
//!
//! Materials are stored in [`MaterialManager`] and objects reference them by
//! ID. Colors are kept in sRGB so they can be edited directly from the debug
//! panel; the uniform carries the linear value.

use std::collections::HashMap;
use wgpu::Device;

use super::color::srgb_to_linear;
use crate::wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer};

/// Material ID for referencing materials
pub type MaterialId = String;

const DEFAULT_MATERIAL_ID: &str = "default";

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Linear RGBA
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    _padding: [f32; 2],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

struct MaterialGpuResources {
    ubo: MaterialUBO,
    bind_group: wgpu::BindGroup,
}

/// Surface description shared by every object that references it
pub struct Material {
    pub name: String,
    /// sRGB color and alpha
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// Render both faces, flipping the normal on back faces
    pub double_sided: bool,

    gpu: Option<MaterialGpuResources>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL_ID, [0.8, 0.8, 0.8], 0.0, 0.5)
    }
}

impl Material {
    /// Creates a new opaque, single-sided material
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - sRGB base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 3], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color: [base_color[0], base_color[1], base_color[2], 1.0],
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            double_sided: false,
            gpu: None,
        }
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn set_color_srgb(&mut self, color: [f32; 3]) {
        let alpha = self.base_color[3];
        self.base_color = [
            color[0].clamp(0.0, 1.0),
            color[1].clamp(0.0, 1.0),
            color[2].clamp(0.0, 1.0),
            alpha,
        ];
    }

    pub fn color_srgb(&self) -> [f32; 3] {
        [self.base_color[0], self.base_color[1], self.base_color[2]]
    }

    /// GPU view of the material; hex-derived sRGB colors are linearized here
    pub fn uniform(&self) -> MaterialUniform {
        let [r, g, b] = srgb_to_linear(self.color_srgb());
        MaterialUniform {
            base_color: [r, g, b, self.base_color[3]],
            metallic: self.metallic,
            roughness: self.roughness,
            _padding: [0.0; 2],
        }
    }

    /// Creates GPU resources on first use and writes the current uniform
    ///
    /// Safe to call every frame; unchanged values are not re-uploaded.
    pub fn update_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        let uniform = self.uniform();
        let gpu = self.gpu.get_or_insert_with(|| {
            let ubo = MaterialUBO::with_content(device, uniform);
            let bind_group = BindGroupBuilder::new(layout)
                .resource(ubo.binding_resource())
                .create(device, &format!("{} Material Bind Group", self.name));
            MaterialGpuResources { ubo, bind_group }
        });
        if gpu.ubo.update_content(queue, uniform) {
            log::debug!("Material '{}' re-uploaded", self.name);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu.as_ref().map(|gpu| &gpu.bind_group)
    }
}

/// Manages all materials in the scene
///
/// Objects reference materials by ID rather than storing material data
/// directly, so objects sharing a look share GPU resources.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material: Material,
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        Self {
            materials: HashMap::new(),
            default_material: Material::default(),
        }
    }

    /// Adds a material, replacing any material with the same name
    pub fn add_material(&mut self, material: Material) {
        if material.name == DEFAULT_MATERIAL_ID {
            self.default_material = material;
            return;
        }
        if self.materials.contains_key(&material.name) {
            log::warn!("Replacing material '{}'", material.name);
        }
        self.materials.insert(material.name.clone(), material);
    }

    /// Adds a material and returns a mutable reference to the stored copy
    pub fn insert(&mut self, material: Material) -> &mut Material {
        let id = material.name.clone();
        self.add_material(material);
        match self.materials.get_mut(&id) {
            Some(material) => material,
            None => &mut self.default_material,
        }
    }

    pub fn get_material(&self, id: &str) -> Option<&Material> {
        if id == DEFAULT_MATERIAL_ID {
            return Some(&self.default_material);
        }
        self.materials.get(id)
    }

    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        if id == DEFAULT_MATERIAL_ID {
            return Some(&mut self.default_material);
        }
        self.materials.get_mut(id)
    }

    pub fn get_default_material(&self) -> &Material {
        &self.default_material
    }

    /// Gets material for an object with fallback to default
    ///
    /// Handles objects with no material assigned and objects naming a
    /// material that does not exist.
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &Material {
        material_id
            .and_then(|id| self.get_material(id))
            .unwrap_or(&self.default_material)
    }

    /// Lists all material IDs, the default material included
    pub fn list_materials(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids.insert(0, DEFAULT_MATERIAL_ID);
        ids
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        layout: &BindGroupLayoutWithDesc,
    ) {
        self.default_material
            .update_gpu_resources(device, queue, layout);
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue, layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_clamped() {
        let material = Material::new("odd", [0.5, 0.5, 0.5], 3.0, -1.0);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);

        let material = material.with_roughness(1.5).with_metallic(-0.2);
        assert_eq!((material.metallic, material.roughness), (0.0, 1.0));
    }

    #[test]
    fn uniform_carries_linear_color() {
        let mut material = Material::new("grey", [1.0, 0.5, 0.0], 0.0, 1.0);
        let uniform = material.uniform();
        assert!((uniform.base_color[0] - 1.0).abs() < 1e-6);
        assert!(uniform.base_color[1] < 0.25);
        assert_eq!(uniform.base_color[2], 0.0);
        assert_eq!(uniform.base_color[3], 1.0);

        material.set_color_srgb([2.0, 0.2, 0.2]);
        assert_eq!(material.color_srgb(), [1.0, 0.2, 0.2]);
    }

    #[test]
    fn hex_colors_are_not_uploaded_as_linear() {
        let srgb = crate::gfx::resources::color::hex_to_srgb(0x808080);
        let uniform = Material::new("floor", srgb, 0.0, 1.0).uniform();

        // mid grey reads about 0.22 in linear light, not 0.5
        assert!((uniform.base_color[0] - 0.2158).abs() < 1e-3);
        assert!(uniform.base_color[0] < srgb[0]);
    }

    #[test]
    fn manager_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::new("tree", [0.1, 0.6, 0.1], 0.0, 1.0));

        let tree = "tree".to_string();
        let missing = "missing".to_string();
        assert_eq!(manager.get_material_for_object(Some(&tree)).name, "tree");
        assert_eq!(manager.get_material_for_object(Some(&missing)).name, "default");
        assert_eq!(manager.get_material_for_object(None).name, "default");
        assert_eq!(manager.list_materials(), vec!["default", "tree"]);
    }

    #[test]
    fn insert_returns_the_stored_material() {
        let mut manager = MaterialManager::new();
        manager
            .insert(Material::new("floor", [0.8, 0.8, 0.8], 0.0, 1.0))
            .double_sided = true;
        assert!(manager.get_material("floor").unwrap().double_sided);
        assert!(manager.get_material("floor").unwrap().get_bind_group().is_none());
    }
}
