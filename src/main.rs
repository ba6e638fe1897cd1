// Animated space portfolio: an instanced 3D backdrop under egui content panels.
// The scene animates from a shared clock; the panels switch on navigation.

mod config;
mod engine;
mod error;
mod portfolio;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use config::PortfolioConfig;
use engine::{
    DrawList, GpuVertex, InstanceData, MeshKind, PointCloud, PointVertex, SceneCamera, SceneClock,
    UiOverlay,
};
use error::PortfolioError;
use portfolio::Portfolio;
use portfolio::links::SystemLauncher;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ============================================================================
// UNIFORM DATA (camera + lights)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    /// rgb = color, a = intensity
    ambient: [f32; 4],
    light_pos: [[f32; 4]; 2],
    light_color: [[f32; 4]; 2],
}

impl Uniforms {
    fn new(view_proj: Mat4) -> Self {
        let blue = engine::srgb_hex(0x4a90ff);
        let red = engine::srgb_hex(0xff4a4a);
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            ambient: [1.0, 1.0, 1.0, 0.2],
            light_pos: [
                Vec3::new(10.0, 10.0, 10.0).extend(1.0).to_array(),
                Vec3::new(-10.0, -10.0, -10.0).extend(1.0).to_array(),
            ],
            light_color: [blue.extend(1.0).to_array(), red.extend(0.5).to_array()],
        }
    }
}

// ============================================================================
// GPU RESOURCES
// ============================================================================

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
    instance_buffer: wgpu::Buffer,
    max_instances: usize,
}

struct GpuCloud {
    vertex_buffer: wgpu::Buffer,
    num_points: u32,
    instance_buffer: wgpu::Buffer,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    mesh_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    clouds: HashMap<Entity, GpuCloud>,

    // ECS World
    world: World,
    schedule: Schedule,
    started: Instant,
    camera: SceneCamera,

    // Content panels
    overlay: UiOverlay,
    portfolio: Portfolio<StdRng>,
    launcher: SystemLauncher,
}

impl State {
    async fn new(window: Arc<Window>, settings: &PortfolioConfig) -> Result<Self, PortfolioError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| PortfolioError::Gpu("no compatible adapter".to_owned()))?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| PortfolioError::Gpu("surface reports no formats".to_owned()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        use wgpu::util::DeviceExt;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms::new(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let point_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
        });

        let mesh_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &mesh_shader,
            "Mesh Pipeline",
            &[GpuVertex::desc(), InstanceData::desc()],
            PipelineKind::Mesh,
            config.format,
        );
        let point_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &point_shader,
            "Point Pipeline",
            &[PointVertex::desc(), InstanceData::desc()],
            PipelineKind::Points,
            config.format,
        );

        // Build the scene, then size GPU buffers to what it contains.
        let mut rng = match settings.scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new();
        world.insert_resource(SceneClock::default());
        engine::spawn_scene(&mut world, &settings.scene, &mut rng);

        let initial = engine::collect(&mut world);
        log::info!("Scene uses {} mesh instances", initial.instance_count());
        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| upload_mesh(&device, kind, initial.instances(kind).len()))
            .collect();

        let mut clouds = HashMap::new();
        let mut query = world.query::<(Entity, &PointCloud)>();
        for (entity, cloud) in query.iter(&world) {
            clouds.insert(entity, upload_cloud(&device, cloud));
        }

        engine::mount_scene(&mut world);

        let overlay = UiOverlay::new(&window, &device, config.format);
        let gauge_rng = StdRng::seed_from_u64(rng.gen_range(0..=u64::MAX));
        let now = Instant::now();

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth_view,
            mesh_pipeline,
            point_pipeline,
            uniform_buffer,
            uniform_bind_group,
            meshes,
            clouds,
            world,
            schedule: engine::animation_schedule(),
            started: now,
            camera: SceneCamera::new(),
            overlay,
            portfolio: Portfolio::new(settings, gauge_rng, now),
            launcher: SystemLauncher::new(settings.links.opener.clone(), settings.assets.clone()),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    fn update(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        self.world.resource_mut::<SceneClock>().advance_to(elapsed);
        self.schedule.run(&mut self.world);

        self.portfolio.update(Instant::now());
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Collect and upload instance data BEFORE creating the render pass
        let draw_list = engine::collect(&mut self.world);
        self.upload_instances(&draw_list);

        let aspect = self.size.width as f32 / self.size.height.max(1) as f32;
        let uniforms = Uniforms::new(self.camera.view_projection(aspect));
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            // One instanced draw per primitive mesh
            render_pass.set_pipeline(&self.mesh_pipeline);
            for kind in MeshKind::ALL {
                let mesh = &self.meshes[kind.index()];
                let count = draw_list.instances(kind).len().min(mesh.max_instances);
                if count == 0 {
                    continue;
                }
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, mesh.instance_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.num_indices, 0, 0..count as u32);
            }

            // Point clouds after opaque meshes so they blend over them
            render_pass.set_pipeline(&self.point_pipeline);
            for (entity, _) in &draw_list.clouds {
                let Some(cloud) = self.clouds.get(entity) else { continue };
                render_pass.set_vertex_buffer(0, cloud.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, cloud.instance_buffer.slice(..));
                render_pass.draw(0..cloud.num_points, 0..1);
            }
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let mut report = portfolio::FrameReport::default();
        self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            |ctx| report = self.portfolio.show(ctx),
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.portfolio.apply(&report.actions, &mut self.launcher);

        Ok(())
    }

    fn upload_instances(&self, draw_list: &DrawList) {
        for kind in MeshKind::ALL {
            let mesh = &self.meshes[kind.index()];
            let instances = draw_list.instances(kind);
            let count = instances.len().min(mesh.max_instances);
            if count > 0 {
                self.queue.write_buffer(&mesh.instance_buffer, 0, bytemuck::cast_slice(&instances[..count]));
            }
        }
        for (entity, instance) in &draw_list.clouds {
            if let Some(cloud) = self.clouds.get(entity) {
                self.queue.write_buffer(&cloud.instance_buffer, 0, bytemuck::cast_slice(&[*instance]));
            }
        }
    }
}

// ============================================================================
// PIPELINE + BUFFER HELPERS
// ============================================================================

#[derive(Clone, Copy, PartialEq)]
enum PipelineKind {
    /// Opaque lit triangles, depth tested and written.
    Mesh,
    /// Alpha-blended points, depth tested but not written.
    Points,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    kind: PipelineKind,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let points = kind == PipelineKind::Points;
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(if points {
                    wgpu::BlendState::ALPHA_BLENDING
                } else {
                    wgpu::BlendState::REPLACE
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: if points {
                wgpu::PrimitiveTopology::PointList
            } else {
                wgpu::PrimitiveTopology::TriangleList
            },
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: if points { None } else { Some(wgpu::Face::Back) },
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: !points,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_mesh(device: &wgpu::Device, kind: MeshKind, max_instances: usize) -> GpuMesh {
    use wgpu::util::DeviceExt;

    let mesh = kind.build();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Mesh Vertex Buffer"),
        contents: mesh.vertex_bytes(),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Mesh Index Buffer"),
        contents: mesh.index_bytes(),
        usage: wgpu::BufferUsages::INDEX,
    });
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Mesh Instance Buffer"),
        size: (max_instances.max(1) * std::mem::size_of::<InstanceData>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GpuMesh {
        vertex_buffer,
        index_buffer,
        num_indices: mesh.index_count() as u32,
        instance_buffer,
        max_instances,
    }
}

fn upload_cloud(device: &wgpu::Device, cloud: &PointCloud) -> GpuCloud {
    use wgpu::util::DeviceExt;

    // An empty cloud still needs a non-empty buffer.
    let placeholder = [PointVertex { position: [0.0; 3], brightness: 0.0 }];
    let points: &[PointVertex] = if cloud.points.is_empty() { &placeholder } else { &cloud.points };

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Point Vertex Buffer"),
        contents: bytemuck::cast_slice(points),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Point Instance Buffer"),
        size: std::mem::size_of::<InstanceData>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    GpuCloud {
        vertex_buffer,
        num_points: cloud.points.len() as u32,
        instance_buffer,
    }
}

// ============================================================================
// MAIN
// ============================================================================

#[derive(Parser, Debug)]
#[command(version, about = "Animated space portfolio")]
struct Args {
    /// TOML config file (defaults to ./portfolio.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the randomized scene layout and gauges
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<(), PortfolioError> {
    env_logger::init();

    let args = Args::parse();
    let mut settings = PortfolioConfig::load_or_default(args.config.as_deref())?;
    if args.seed.is_some() {
        settings.scene.seed = args.seed;
    }
    if args.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;

    let window_attributes = Window::default_attributes()
        .with_title(settings.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(settings.window.width, settings.window.height));

    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut state = pollster::block_on(State::new(window.clone(), &settings))?;
    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();

    event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let response = state.overlay.handle_window_event(&window, event);
                if response.consumed {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        state.update();
                        match state.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.resize(state.size)
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("GPU out of memory, exiting");
                                control_flow.exit();
                            }
                            Err(e) => log::warn!("{e:?}"),
                        }

                        frame_count += 1;
                        let now = Instant::now();
                        if (now - last_fps_update).as_secs_f32() >= 1.0 {
                            log::debug!(
                                "FPS: {} | Section: {}",
                                frame_count,
                                state.portfolio.active().id()
                            );
                            frame_count = 0;
                            last_fps_update = now;
                        }
                    }
                    _ => {}
                }
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
