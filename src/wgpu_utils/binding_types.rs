// src/wgpu_utils/binding_types.rs
//! Binding types for the layouts built with [`super::BindGroupLayoutBuilder`]

/// Uniform buffer binding sized for `T`
///
/// wgpu checks the bound buffer and the shader's struct against this size
/// when the bind group and pipeline are created, not at draw time.
pub fn uniform_for<T: bytemuck::Pod>() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_carries_the_struct_size() {
        match uniform_for::<[[f32; 4]; 4]>() {
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                min_binding_size: Some(size),
                ..
            } => assert_eq!(size.get(), 64),
            other => panic!("unexpected binding type {:?}", other),
        }
    }
}
