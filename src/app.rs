use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    config::AppConfig,
    error::{EvergreenError, Result},
    gfx::{
        rendering::{RenderEngine, RenderSettings},
        scene::Scene,
    },
    holiday::{DebugParameters, HolidayScene},
    ui::{debug_panel, UiManager},
};

/// Window, GPU and scene wired to the winit event loop
pub struct EvergreenApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    holiday: HolidayScene,
    params: DebugParameters,
    /// Startup failure reported once the event loop returns
    error: Option<EvergreenError>,
}

impl EvergreenApp {
    /// Builds the scene on the CPU; the window and GPU follow on `resumed`
    pub fn new(config: AppConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let font = HolidayScene::load_font(&config);
        let (scene, holiday) = HolidayScene::build(&config, font.as_ref());
        let params = holiday.parameters();

        let stats = scene.get_statistics();
        log::info!(
            "Scene built: {} objects, {} triangles",
            stats.object_count,
            stats.total_triangles
        );

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                holiday,
                params,
                error: None,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(LogicalSize::new(window_config.width, window_config.height)),
            )?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let settings = RenderSettings {
            vsync: window_config.vsync,
            antialias: self.config.render.antialias,
        };

        let window_clone = window.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, &settings).await
        })?;

        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        self.scene
            .init_gpu_resources(renderer.device(), renderer.queue(), renderer.layouts());

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state == ElementState::Pressed
            && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
        {
            event_loop.exit();
            return;
        }
        self.scene.camera_manager.process_keyboard_event(event);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_engine)) =
            (self.window.as_ref(), self.render_engine.as_mut())
        else {
            return;
        };

        // Panel edits land in this frame
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let stats = self.scene.get_statistics();
            let show_panel = self.config.debug.show_panel;
            let slider_range = self.holiday.slider_range();
            let params = &mut self.params;
            let mut changed = false;

            ui_manager.update_logic(window, |ui| {
                if show_panel {
                    changed = debug_panel(ui, params, slider_range, &stats);
                }
            });

            if changed {
                self.holiday.apply(&mut self.params, &mut self.scene);
            }
        }

        self.scene.update();
        self.scene.sync_gpu(
            render_engine.device(),
            render_engine.queue(),
            render_engine.layouts(),
        );
        render_engine.update(
            self.scene.camera_manager.camera.uniform,
            &self.scene.lighting,
        );

        let result = match self.ui_manager.as_mut() {
            Some(ui_manager) => render_engine.render_frame(
                &self.scene,
                Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     view: &wgpu::TextureView| {
                        ui_manager.render_display_only(device, queue, encoder, view);
                    },
                ),
            ),
            None => render_engine.render_frame(
                &self.scene,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            ),
        };

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfiguring");
                let PhysicalSize { width, height } = window.inner_size();
                render_engine.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Dropped frame: {}", e),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Failed to initialise graphics: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene
                    .camera_manager
                    .process_mouse_button(button, state);
            }
            WindowEvent::Focused(false) => self.scene.camera_manager.controller.release_all(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        // Don't move the camera while the UI is being used
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_input())
        {
            return;
        }

        self.scene.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
