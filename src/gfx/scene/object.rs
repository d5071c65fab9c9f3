use std::ops::Range;

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::{
    gfx::{geometry::GeometryData, resources::material::MaterialId},
    wgpu_utils::{BindGroupBuilder, BindGroupLayoutWithDesc, UniformBuffer},
};

/// Geometry ready for drawing; GPU buffers exist once uploaded
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self {
            index_count: indices.len() as u32,
            vertex_count: vertices.len() as u32,
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Translation, XYZ Euler rotation (radians) and uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Model matrix: T * Rx * Ry * Rz * S
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
}

pub struct ObjectGpuResources {
    transform_ubo: UniformBuffer<ObjectUniform>,
    transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    pub visible: bool,
    material_id: Option<MaterialId>,
    gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources called
}

impl Object {
    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            transform: Transform::default(),
            visible: true,
            material_id: None,
            gpu_resources: None,
        }
    }

    pub fn from_geometry(name: &str, geometry: &GeometryData) -> Self {
        Self::new(name, vec![Mesh::from_geometry(geometry)])
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Rotation around X in radians
    pub fn with_rotation_x(mut self, angle: f32) -> Self {
        self.transform.rotation.x = angle;
        self
    }

    pub fn with_material(mut self, material_id: &str) -> Self {
        self.set_material(material_id);
        self
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn get_material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.transform.position = position;
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.gpu_resources.is_some()
    }

    /// Uploads mesh buffers and creates the per-object transform binding
    pub fn init_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        transform_layout: &BindGroupLayoutWithDesc,
    ) {
        for mesh in &mut self.meshes {
            mesh.upload(device, &self.name);
        }

        let transform_ubo = UniformBuffer::with_content(device, self.uniform());
        let transform_bind_group = BindGroupBuilder::new(transform_layout)
            .resource(transform_ubo.binding_resource())
            .create(device, &format!("{} Transform Bind Group", self.name));

        self.gpu_resources = Some(ObjectGpuResources {
            transform_ubo,
            transform_bind_group,
        });

        log::debug!(
            "Uploaded '{}': {} meshes, {} vertices",
            self.name,
            self.meshes.len(),
            self.meshes.iter().map(|m| m.vertex_count).sum::<u32>()
        );
    }

    /// Writes the current transform to the GPU; unchanged transforms are skipped
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let uniform = self.uniform();
        if let Some(gpu_resources) = &mut self.gpu_resources {
            gpu_resources.transform_ubo.update_content(queue, uniform);
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    fn uniform(&self) -> ObjectUniform {
        ObjectUniform {
            model: self.transform.to_matrix().into(),
        }
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    /// Binds the object's transform at group 1 and draws every mesh
    fn draw_object(&mut self, object: &'b Object) {
        let Some(transform_bind_group) = object.get_transform_bind_group() else {
            return;
        };
        self.set_bind_group(1, transform_bind_group, &[]);
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_plane;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn transform_applies_translation_after_rotation() {
        let transform = Transform {
            position: Vector3::new(0.0, 0.0, -3.0),
            rotation: Vector3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            scale: 1.0,
        };
        // the plane's +Z normal lies along +Y after a -90 degree turn about X
        let normal = transform.to_matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((normal.truncate() - Vector3::new(0.0, 1.0, 0.0)).magnitude() < 1e-5);

        let origin = transform.to_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.truncate() - Vector3::new(0.0, 0.0, -3.0)).magnitude() < 1e-6);
    }

    #[test]
    fn object_from_geometry_counts_vertices() {
        let object = Object::from_geometry("floor", &generate_plane(6.0, 4.0, 1, 1))
            .with_position(0.0, 0.0, -3.0)
            .with_material("floor");

        assert_eq!(object.meshes[0].vertex_count, 4);
        assert_eq!(object.meshes[0].index_count, 6);
        assert_eq!(object.get_material_id().map(String::as_str), Some("floor"));
        assert!(!object.has_gpu_resources());
        assert!(object.get_transform_bind_group().is_none());
    }
}
