use anyhow::Result;
use clap::Parser;
use cubeview_input::{InputController, InputEvent, PanDirection};
use cubeview_mesh::{CubeMesh, Rgba};
use cubeview_render_wgpu::CubeRenderer;
use cubeview_view::ViewState;
use egui::Context as EguiContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixels of wheel delta per scroll line, matching typical browser wheel
/// granularity.
const WHEEL_LINE_PIXELS: f32 = 40.0;

#[derive(Parser)]
#[command(name = "cubeview-desktop", about = "Interactive 3D cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Startup cube color as #RRGGBB (defaults to the multi-color palette)
    #[arg(long)]
    color: Option<String>,
}

/// Application state: the mesh colors, the view, and the input queue.
struct AppState {
    view: ViewState,
    input: InputController,
    mesh: CubeMesh,
    cursor: (f32, f32),
    picker_rgb: [f32; 3],
    palette_dirty: bool,
}

impl AppState {
    fn new(startup_color: Option<String>) -> Self {
        let mut mesh = CubeMesh::new();
        let mut picker_rgb = [1.0, 0.0, 0.0];

        if let Some(hex) = startup_color {
            match Rgba::from_hex(&hex) {
                Ok(color) => {
                    mesh.set_uniform_color(color);
                    picker_rgb = [color.r, color.g, color.b];
                }
                // Malformed picker input is a no-op, not an error.
                Err(e) => tracing::warn!("ignoring --color: {e}"),
            }
        }

        Self {
            view: ViewState::default(),
            input: InputController::new(),
            mesh,
            cursor: (0.0, 0.0),
            picker_rgb,
            palette_dirty: false,
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        // Host key-repeat drives repetition; every press event is one step.
        let direction = match key {
            KeyCode::ArrowUp => PanDirection::Up,
            KeyCode::ArrowDown => PanDirection::Down,
            KeyCode::ArrowLeft => PanDirection::Left,
            KeyCode::ArrowRight => PanDirection::Right,
            _ => return,
        };
        self.input.push(InputEvent::Pan(direction));
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        egui::Window::new("Palette")
            .resizable(false)
            .default_pos((12.0, 12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Cube color:");
                    if ui.color_edit_button_rgb(&mut self.picker_rgb).changed() {
                        let [r, g, b] = self.picker_rgb;
                        self.mesh.set_uniform_color(Rgba::opaque(r, g, b));
                        self.palette_dirty = true;
                    }
                });
                ui.small("Drag: rotate | Wheel: zoom | Arrows: pan");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<CubeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(startup_color: Option<String>) -> Self {
        Self {
            state: AppState::new(startup_color),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("cubeview")
            .with_inner_size(PhysicalSize::new(1024u32, 768));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Shader compilation or pipeline validation failure is fatal here,
        // before the first frame.
        let renderer = CubeRenderer::new(
            &device,
            surface_format,
            &self.state.mesh,
            size.width,
            size.height,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.state.cursor = (x, y);
                self.state.input.push(InputEvent::PointerMove { x, y });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let (x, y) = self.state.cursor;
                let event = match btn_state {
                    ElementState::Pressed => InputEvent::PointerDown { x, y },
                    ElementState::Released => InputEvent::PointerUp,
                };
                self.state.input.push(event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit's vertical delta is positive scrolling up; browser
                // wheel deltas are positive scrolling down.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => -lines * WHEEL_LINE_PIXELS,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.state.input.push(InputEvent::Wheel { delta_y });
            }
            WindowEvent::RedrawRequested => {
                self.state.input.drain(&mut self.state.view);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let config = self.config.as_ref().unwrap();
                let aspect = config.width as f32 / config.height.max(1) as f32;

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.view, aspect);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                if self.state.palette_dirty {
                    if let Some(renderer) = &self.renderer {
                        renderer.update_colors(queue, &self.state.mesh.colors);
                    }
                    self.state.palette_dirty = false;
                }

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [config.width, config.height],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
                                    resolve_target: None,
                                    ops: wgpu::Operations {
                                        load: wgpu::LoadOp::Load,
                                        store: wgpu::StoreOp::Store,
                                    },
                                })],
                                depth_stencil_attachment: None,
                                ..Default::default()
                            })
                            .forget_lifetime();
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli.color);
    event_loop.run_app(&mut app)?;

    Ok(())
}
