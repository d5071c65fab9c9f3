//! WGPU-based rendering engine
//!
//! Owns the surface, device and pipelines. Each frame draws the scene in a
//! single depth-tested pass (multisampled when available) and then hands the
//! surface to the UI overlay.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::{
    error::{EvergreenError, Result},
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            color::srgb_to_linear,
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            texture_resource::TextureResource,
        },
        scene::{
            lighting::Lighting,
            object::DrawObject,
            scene::{Scene, SceneLayouts},
        },
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};

const STANDARD_PIPELINE: &str = "Standard";
const DOUBLE_SIDED_PIPELINE: &str = "StandardDoubleSided";
const MSAA_SAMPLES: u32 = 4;

/// Presentation options chosen at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub vsync: bool,
    pub antialias: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            antialias: true,
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    sample_count: u32,
    depth_texture: TextureResource,
    msaa_target: Option<TextureResource>,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    layouts: SceneLayouts,
    clear_color: wgpu::Color,
    /// Set when the surface format has no hardware sRGB encoding
    encode_srgb: bool,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `settings` - Vsync and antialiasing preferences
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        settings: &RenderSettings,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter '{}' ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(EvergreenError::NoSurfaceFormat)?;
        let encode_srgb = !format.is_srgb();
        if encode_srgb {
            log::warn!(
                "Surface format {:?} is not sRGB; encoding in the shader",
                format
            );
        }

        let present_mode = choose_present_mode(settings.vsync, &surface_capabilities.present_modes);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = if settings.antialias
            && supports_samples(&adapter, format, MSAA_SAMPLES)
            && supports_samples(&adapter, TextureResource::DEPTH_FORMAT, MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            if settings.antialias {
                log::warn!("{}x MSAA unsupported for {:?}; rendering without it", MSAA_SAMPLES, format);
            }
            1
        };
        log::info!(
            "Surface {}x{} {:?}, {:?}, {}x MSAA",
            config.width,
            config.height,
            format,
            present_mode,
            sample_count
        );

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, sample_count, "depth_texture");
        let msaa_target = (sample_count > 1).then(|| {
            TextureResource::create_msaa_target(&device, &config, sample_count, "msaa_target")
        });

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let layouts = SceneLayouts::new(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("standard", include_str!("standard.wgsl"));

        let standard = PipelineConfig::default()
            .with_shader("standard")
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_color_format(format)
            .with_sample_count(sample_count)
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                layouts.transform.layout.clone(),
                layouts.material.layout.clone(),
            ]);

        pipeline_manager.register_pipeline(
            STANDARD_PIPELINE,
            standard.clone().with_label(STANDARD_PIPELINE),
        );
        pipeline_manager.register_pipeline(
            DOUBLE_SIDED_PIPELINE,
            standard
                .with_label(DOUBLE_SIDED_PIPELINE)
                .with_cull_mode(None),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }
        let PipelineStats {
            registered_pipelines,
            created_pipelines,
            loaded_shaders,
        } = pipeline_manager.get_stats();
        log::info!(
            "Pipelines ready: {}/{} created from {} shaders",
            created_pipelines,
            registered_pipelines,
            loaded_shaders
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            format,
            sample_count,
            depth_texture,
            msaa_target,
            pipeline_manager,
            global_ubo,
            global_bindings,
            layouts,
            clear_color: wgpu::Color::BLACK,
            encode_srgb,
        })
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// The overlay callback receives the surface view after the scene has
    /// been resolved into it and must load, not clear, the attachment.
    ///
    /// # Errors
    /// Returns the surface error when no frame could be acquired; the caller
    /// decides whether to reconfigure, skip or quit.
    pub fn render_frame<F>(
        &mut self,
        scene: &Scene,
        ui_callback: Option<F>,
    ) -> std::result::Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (view, resolve_target, store) = match &self.msaa_target {
                Some(msaa) => (
                    &msaa.view,
                    Some(&surface_texture_view),
                    wgpu::StoreOp::Discard,
                ),
                None => (&surface_texture_view, None, wgpu::StoreOp::Store),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            for object in scene.objects.iter().filter(|o| o.visible) {
                let material = scene.get_material_for_object(object);
                let Some(material_bind_group) = material.get_bind_group() else {
                    log::trace!(
                        "Skipping '{}': material '{}' has no GPU resources",
                        object.name,
                        material.name
                    );
                    continue;
                };

                let pipeline_name = if material.double_sided {
                    DOUBLE_SIDED_PIPELINE
                } else {
                    STANDARD_PIPELINE
                };
                let Some(pipeline) = self.pipeline_manager.pipeline(pipeline_name) else {
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(2, material_bind_group, &[]);
                render_pass.draw_object(object);
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Writes camera and lighting uniforms for the next frame
    ///
    /// # Arguments
    /// * `camera_uniform` - Updated camera uniform data
    /// * `lighting` - Lights and background color of the scene
    pub fn update(&mut self, camera_uniform: CameraUniform, lighting: &Lighting) {
        update_global_ubo(
            &mut self.global_ubo,
            &self.queue,
            camera_uniform,
            lighting,
            self.encode_srgb,
        );
        self.clear_color = clear_color(lighting.background, self.encode_srgb);
    }

    /// Resizes the surface and recreates the size-dependent targets
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.recreate_targets();
    }

    fn recreate_targets(&mut self) {
        self.depth_texture = TextureResource::create_depth_texture(
            &self.device,
            &self.config,
            self.sample_count,
            "depth_texture",
        );
        self.msaa_target = (self.sample_count > 1).then(|| {
            TextureResource::create_msaa_target(
                &self.device,
                &self.config,
                self.sample_count,
                "msaa_target",
            )
        });
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Bind group layouts objects and materials are created against
    pub fn layouts(&self) -> &SceneLayouts {
        &self.layouts
    }
}

fn supports_samples(adapter: &wgpu::Adapter, format: TextureFormat, samples: u32) -> bool {
    adapter
        .get_texture_format_features(format)
        .flags
        .sample_count_supported(samples)
}

/// Fifo is always available; Immediate falls back to Mailbox, then Fifo
fn choose_present_mode(vsync: bool, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

/// Clear values bypass the shader, so they are linearized only when the
/// surface encodes sRGB itself
fn clear_color(background: [f32; 3], encode_srgb: bool) -> wgpu::Color {
    let [r, g, b] = if encode_srgb {
        background
    } else {
        srgb_to_linear(background)
    };
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::PresentMode;

    #[test]
    fn present_mode_follows_vsync() {
        let all = [PresentMode::Fifo, PresentMode::Immediate, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(true, &all), PresentMode::Fifo);
        assert_eq!(choose_present_mode(false, &all), PresentMode::Immediate);
        assert_eq!(
            choose_present_mode(false, &[PresentMode::Fifo, PresentMode::Mailbox]),
            PresentMode::Mailbox
        );
        assert_eq!(choose_present_mode(false, &[PresentMode::Fifo]), PresentMode::Fifo);
    }

    #[test]
    fn clear_color_matches_surface_encoding() {
        let grey = [0.5, 0.5, 0.5];
        assert_eq!(clear_color(grey, true).r, 0.5);
        assert!(clear_color(grey, false).r < 0.25);
        assert_eq!(clear_color(grey, false).a, 1.0);
    }
}
