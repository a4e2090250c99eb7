use std::rc::Rc;
use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use glam::{Affine2, Mat4, Vec2, Vec4};
use trail_core::{
    CanvasSubmit, ColorGradient, TextureRef, Trail, TrailConfig, TrailEvent, TrailMesh,
    TrailStyle, TrailVertex, WidthCurve,
};

mod constants;
mod strip;

use constants::*;
use strip::{LinearTaper, StripBuilder, TwoStopGradient};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    local_to_clip: [[f32; 4]; 4],
}

/// Geometry submitted by the trail for the current frame.
#[derive(Default)]
struct FrameMesh {
    vertices: Vec<TrailVertex>,
    indices: Vec<u32>,
}

impl FrameMesh {
    fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl CanvasSubmit for FrameMesh {
    fn submit(&mut self, mesh: &TrailMesh, texture: Option<&TextureRef>) {
        if let Some(t) = texture {
            log::trace!("[draw] texture {} ignored by the demo pipeline", t.id);
        }
        self.vertices = mesh.interleaved();
        self.indices.clone_from(&mesh.indices);
    }
}

/// Emitter placement, trail state and the per-frame update.
struct DemoApp {
    trail: Trail,
    builder: StripBuilder,
    frame_mesh: FrameMesh,
    events: Vec<TrailEvent>,
    cursor: Vec2,
    autopilot: bool,
    clock: f32,
    last_frame: Instant,
}

impl DemoApp {
    fn new(start: Vec2) -> anyhow::Result<Self> {
        let config = TrailConfig::new(TRAIL_LIFETIME_SEC, TRAIL_SEGMENT_LENGTH)?;
        let mut style = TrailStyle::default();
        style.set_width(TRAIL_WIDTH);
        style.set_curve(Some(Rc::new(LinearTaper { tail_scale: 0.15 }) as Rc<dyn WidthCurve>));
        style.set_gradient(Some(Rc::new(TwoStopGradient {
            head: HEAD_COLOR,
            tail: TAIL_COLOR,
        }) as Rc<dyn ColorGradient>));

        Ok(Self {
            trail: Trail::with_transform(config, style, Affine2::from_translation(start)),
            builder: StripBuilder::default(),
            frame_mesh: FrameMesh::default(),
            events: Vec::new(),
            cursor: start,
            autopilot: false,
            clock: 0.0,
            last_frame: Instant::now(),
        })
    }

    fn emitter_position(&self, size: Vec2) -> Vec2 {
        if !self.autopilot {
            return self.cursor;
        }
        let tau = std::f32::consts::TAU;
        let amp = size * AUTOPILOT_AMPLITUDE;
        size * 0.5
            + Vec2::new(
                amp.x * (tau * AUTOPILOT_FREQ_X * self.clock).sin(),
                amp.y * (tau * AUTOPILOT_FREQ_Y * self.clock).sin(),
            )
    }

    fn handle_key(&mut self, key: &Key) {
        match key {
            Key::Named(NamedKey::Space) => {
                let on = !self.trail.is_emitting();
                self.trail.set_emitting(on);
                log::info!("[keys] emitting={}", on);
            }
            Key::Character(c) if c.as_str() == "a" => {
                self.autopilot = !self.autopilot;
                log::info!("[keys] autopilot={}", self.autopilot);
            }
            _ => {}
        }
    }

    fn frame(&mut self, size: Vec2) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64().min(MAX_FRAME_DT_SEC);
        self.last_frame = now;
        self.clock += dt as f32;

        let transform = Affine2::from_translation(self.emitter_position(size));
        if self.trail.is_processing() {
            self.events.clear();
            self.trail.tick(dt, transform, &mut self.events);
            for ev in &self.events {
                match ev {
                    TrailEvent::Finished => log::info!("[trail] finished"),
                }
            }
        } else {
            self.trail.set_global_transform(transform);
        }

        if self.trail.redraw_handle().is_pending() {
            self.frame_mesh.clear();
            self.trail.draw(&mut self.builder, &mut self.frame_mesh);
        }
    }

    /// Emitter local space to clip space for a window of `size` pixels (y down).
    fn local_to_clip(&self, size: Vec2) -> [[f32; 4]; 4] {
        let proj = Mat4::orthographic_rh(0.0, size.x, size.y, 0.0, -1.0, 1.0);
        let emitter = self.trail.global_transform();
        let model = Mat4::from_cols(
            emitter.matrix2.x_axis.extend(0.0).extend(0.0),
            emitter.matrix2.y_axis.extend(0.0).extend(0.0),
            Vec4::Z,
            emitter.translation.extend(0.0).extend(1.0),
        );
        (proj * model).to_cols_array_2d()
    }
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trail_shader"),
            source: wgpu::ShaderSource::Wgsl(trail_core::TRAIL_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // pos, uv, color
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TrailVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 8,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 2,
                },
            ],
        }];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trail_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            width: size.width,
            height: size.height,
        })
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width.max(1) as f32, self.height.max(1) as f32)
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, app: &DemoApp) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                local_to_clip: app.local_to_clip(self.size()),
            }),
        );

        // Trail geometry changes every tick, so buffers are rebuilt per frame.
        let mesh = &app.frame_mesh;
        let buffers = (!mesh.indices.is_empty()).then(|| {
            let vb = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("trail_vb"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let ib = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("trail_ib"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            (vb, ib)
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some((vb, ib)) = &buffers {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.indices.len() as u32, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ribbon trail (native) - Space: emit on/off, A: autopilot")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut app = DemoApp::new(state.size() * 0.5)?;
    log::info!("trail-native starting");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => app.cursor = Vec2::new(position.x as f32, position.y as f32),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => app.handle_key(&logical_key),
        Event::AboutToWait => {
            app.frame(state.size());
            match state.render(&app) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
