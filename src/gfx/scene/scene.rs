use wgpu::Device;

use super::{
    lighting::Lighting,
    object::{Object, ObjectUniform},
};
use crate::{
    gfx::{
        camera::camera_utils::CameraManager,
        resources::material::{Material, MaterialManager, MaterialUniform},
    },
    wgpu_utils::{binding_types, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
};

/// Bind group layouts shared by every object and material
pub struct SceneLayouts {
    pub transform: BindGroupLayoutWithDesc,
    pub material: BindGroupLayoutWithDesc,
}

impl SceneLayouts {
    pub fn new(device: &Device) -> Self {
        Self {
            transform: BindGroupLayoutBuilder::new()
                .next_binding_vertex(binding_types::uniform_for::<ObjectUniform>())
                .create(device, "Transform Bind Group Layout"),
            material: BindGroupLayoutBuilder::new()
                .next_binding_fragment(binding_types::uniform_for::<MaterialUniform>())
                .create(device, "Material Bind Group Layout"),
        }
    }
}

/// Main scene containing objects, materials, lights and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lighting: Lighting,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lighting: Lighting::default(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds an object and returns its index
    pub fn add_object(&mut self, object: Object) -> usize {
        if self.objects.iter().any(|o| o.name == object.name) {
            log::warn!("Scene already has an object named '{}'", object.name);
        }
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Creates a new material and adds it to the material manager
    ///
    /// # Arguments
    /// * `name` - Unique name for the material
    /// * `base_color` - sRGB color
    /// * `metallic` - Metallic factor
    /// * `roughness` - Roughness factor
    ///
    /// # Returns
    /// Mutable reference to the created material
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 3],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.material_manager
            .insert(Material::new(name, base_color, metallic, roughness))
    }

    /// Creates GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue, layouts: &SceneLayouts) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, &layouts.transform);
        }

        self.material_manager
            .update_all_gpu_resources(device, queue, &layouts.material);

        let stats = self.get_statistics();
        log::info!(
            "Scene uploaded: {} objects, {} materials, {} triangles",
            stats.object_count,
            stats.material_count,
            stats.total_triangles
        );
    }

    /// Pushes transform and material edits to the GPU
    ///
    /// Unchanged uniforms are skipped by the underlying buffers.
    pub fn sync_gpu(&mut self, device: &Device, queue: &wgpu::Queue, layouts: &SceneLayouts) {
        for object in &mut self.objects {
            object.update_transform(queue);
        }
        self.material_manager
            .update_all_gpu_resources(device, queue, &layouts.material);
    }

    /// Returns the material assigned to the object, or the default material
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Finds the index of the first object with the given name
    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    pub fn get_object_names(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.name.clone()).collect()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.index_count / 3).sum::<u32>())
            .sum();

        let total_vertices: u32 = self
            .objects
            .iter()
            .map(|obj| obj.meshes.iter().map(|m| m.vertex_count).sum::<u32>())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera},
        geometry::{generate_cone, generate_plane},
    };
    use cgmath::{Vector3, Zero};

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(3.0, 0.0, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn objects_fall_back_to_default_material() {
        let mut scene = empty_scene();
        let plain = scene.add_object(Object::from_geometry("plain", &generate_plane(1.0, 1.0, 1, 1)));
        let missing = scene.add_object(
            Object::from_geometry("missing", &generate_plane(1.0, 1.0, 1, 1)).with_material("nope"),
        );

        let default_name = scene.material_manager.get_default_material().name.clone();
        for index in [plain, missing] {
            let object = scene.get_object(index).unwrap();
            assert_eq!(scene.get_material_for_object(object).name, default_name);
        }
    }

    #[test]
    fn statistics_sum_meshes() {
        let mut scene = empty_scene();
        scene.add_object(Object::from_geometry("floor", &generate_plane(6.0, 4.0, 1, 1)));
        scene.add_object(Object::from_geometry("tree", &generate_cone(0.5, 2.0, 8)));
        scene.add_material("tree", [0.1, 0.6, 0.1], 0.0, 1.0);

        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.material_count, 2); // default + tree
        assert_eq!(stats.total_triangles, 2 + 8 * 2 + 8);
        assert_eq!(scene.find_object("tree"), Some(1));
        assert_eq!(scene.find_object("stump"), None);
    }
}
