//! Window shell and per-frame render loop.
//!
//! The application is an explicit winit [`ApplicationHandler`] with two
//! states: `Pending` until the event loop delivers `resumed`, then `Running`
//! with every component constructed. Each redraw digests input, feeds the
//! scroll coordinator, advances the scene, and encodes one render pass with
//! the toon meshes and the particle field.
//!
//! Teardown is explicit: closing the window (or pressing Escape) exits the
//! event loop, which stops the redraw chain rather than leaving a recurring
//! callback alive.

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use glam::Vec2;

use crate::camera::{Camera, CameraRig};
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::particle_pass::ParticlePass;
use crate::scene::Showcase;
use crate::scroll::{ScrollConfig, ScrollCoordinator};
use crate::toon_pass::{DrawCall, ToonPass};

/// Keys that select a material color, in palette order.
const PALETTE_KEYS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub scroll: ScrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Triptych".to_string(),
            width: 1280,
            height: 720,
            scroll: ScrollConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn scroll(mut self, scroll: ScrollConfig) -> Self {
        self.scroll = scroll;
        self
    }
}

/// Run the showcase until the window closes.
pub fn run(config: AppConfig) {
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::Pending { config };
    event_loop.run_app(&mut app).unwrap();
}

enum App {
    Pending {
        config: AppConfig,
    },
    Running(Box<Running>),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    input: Input,
    coordinator: ScrollCoordinator,
    showcase: Showcase,
    camera: Camera,
    rig: CameraRig,
    toon_pass: ToonPass,
    particle_pass: ParticlePass,
    start_time: Instant,
    last_frame: Instant,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let App::Pending { config } = self else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

        let gpu = GpuContext::new(window.clone());
        let viewport = Vec2::new(gpu.width() as f32, gpu.height() as f32);

        let scroll = config.scroll;
        let input = Input::new(viewport, scroll.max_scroll(viewport.y));
        let coordinator = ScrollCoordinator::new(scroll, viewport.y);
        let showcase = Showcase::new(&gpu, &scroll);
        let toon_pass = ToonPass::new(&gpu);
        let particle_pass = ParticlePass::new(&gpu, showcase.particles());

        log::info!(
            "showcase ready: {} sections, {} particles",
            scroll.section_count,
            showcase.particles().len()
        );

        *self = App::Running(Box::new(Running {
            window,
            gpu,
            input,
            coordinator,
            showcase,
            camera: Camera::new(),
            rig: CameraRig::new(),
            toon_pass,
            particle_pass,
            start_time: Instant::now(),
            last_frame: Instant::now(),
        }));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let App::Running(running) = self else {
            return;
        };

        running.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if running.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                running.frame();
            }
            _ => {}
        }
    }
}

impl Running {
    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        let viewport = Vec2::new(self.gpu.width() as f32, self.gpu.height() as f32);
        self.coordinator.set_viewport_height(viewport.y);
        self.input
            .set_viewport(viewport, self.coordinator.config().max_scroll(viewport.y));
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let time = self.start_time.elapsed().as_secs_f32();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Inputs observed this frame; most recent samples win.
        if let Some(impulse) = self.coordinator.on_scroll(self.input.scroll_offset()) {
            self.showcase.apply_impulse(&impulse);
        }
        self.coordinator.on_cursor_move(self.input.normalized_cursor());

        for (index, key) in PALETTE_KEYS.iter().enumerate() {
            if self.input.key_pressed(*key) {
                self.showcase.set_palette(index);
            }
        }

        let camera_frame = self.coordinator.tick(time);
        self.rig.apply(&camera_frame);
        self.showcase.update(dt);

        let color = self.showcase.material_color();
        let draw_calls: Vec<DrawCall> = self
            .showcase
            .draws()
            .map(|(mesh, transform)| DrawCall {
                mesh,
                transform,
                color,
            })
            .collect();

        self.toon_pass.ensure_depth_size(&self.gpu);
        self.toon_pass
            .prepare(&self.gpu, &self.camera, &self.rig, time, &draw_calls);
        self.particle_pass
            .prepare(&self.gpu, &self.camera, &self.rig, color);

        let output = self.gpu.surface.get_current_texture().unwrap();
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let background = self.toon_pass.background;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Showcase Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background.x as f64,
                            g: background.y as f64,
                            b: background.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.toon_pass.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.toon_pass.render(&mut render_pass, &draw_calls);
            self.particle_pass.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.input.begin_frame();
        self.window.request_redraw();
    }
}
