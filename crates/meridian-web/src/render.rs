use glam::Mat4;
use meridian_core::constants::{ARC_SAMPLES, POINT_SPRITE_SCALE};
use meridian_core::GlobeEngine;
use web_sys as web;
use wgpu::util::DeviceExt;

// Marker discs render in a fixed warm accent so they read against the
// grayscale cloud.
const MARKER_COLOR: [f32; 3] = [0.95, 0.85, 0.6];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    proj: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointInstance {
    center: [f32; 3],
    scale: f32,
    color: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FlatVertex {
    position: [f32; 3],
    color: [f32; 3],
}

#[allow(clippy::too_many_arguments)]
fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    label: &str,
    vs: &str,
    fs: &str,
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    point_pipeline: wgpu::RenderPipeline,
    arc_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,

    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    arc_vb: wgpu::Buffer,
    marker_vb: wgpu::Buffer,
    marker_vertex_count: u32,

    instance_scratch: Vec<PointInstance>,
    arc_scratch: Vec<FlatVertex>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        engine: &GlobeEngine,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
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
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(meridian_core::SCENE_WGSL.into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<PointInstance>() * engine.positions().len()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // arc segments are rewritten each frame; markers never change in
        // the sphere's local frame so their buffer is filled once
        let arc_capacity = engine.arcs().len().max(1) * (ARC_SAMPLES - 1) * 2;
        let arc_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arc_vb"),
            size: (std::mem::size_of::<FlatVertex>() * arc_capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let marker_vertices: Vec<FlatVertex> = engine
            .markers()
            .iter()
            .flat_map(|m| m.disc_vertices().iter())
            .map(|v| FlatVertex {
                position: v.to_array(),
                color: MARKER_COLOR,
            })
            .collect();
        let marker_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_vb"),
            contents: bytemuck::cast_slice(&marker_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let point_layouts = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let flat_layout = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];

        let point_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            "point_pipeline",
            "vs_point",
            "fs_point",
            &point_layouts,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let arc_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            "arc_pipeline",
            "vs_flat",
            "fs_flat",
            &flat_layout,
            wgpu::PrimitiveTopology::LineList,
        );
        let disc_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            "disc_pipeline",
            "vs_flat",
            "fs_flat",
            &flat_layout,
            wgpu::PrimitiveTopology::TriangleList,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            bind_group,
            point_pipeline,
            arc_pipeline,
            disc_pipeline,
            quad_vb,
            instance_vb,
            arc_vb,
            marker_vb,
            marker_vertex_count: marker_vertices.len() as u32,
            instance_scratch: Vec::with_capacity(engine.positions().len()),
            arc_scratch: Vec::with_capacity(arc_capacity),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the frame's buffers from the engine and draw the three
    /// primitive streams: cloud sprites, visible arc segments, marker discs.
    pub fn render(&mut self, engine: &GlobeEngine) -> anyhow::Result<()> {
        let proj: Mat4 = engine.projection_matrix();
        let model_view: Mat4 = engine.model_view_matrix();
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                proj: proj.to_cols_array_2d(),
                model_view: model_view.to_cols_array_2d(),
            }),
        );

        self.instance_scratch.clear();
        for (position, color) in engine.positions().iter().zip(engine.colors()) {
            self.instance_scratch.push(PointInstance {
                center: position.to_array(),
                scale: POINT_SPRITE_SCALE,
                color: *color,
                _pad: 0.0,
            });
        }
        self.queue.write_buffer(
            &self.instance_vb,
            0,
            bytemuck::cast_slice(&self.instance_scratch),
        );

        self.arc_scratch.clear();
        for arc in engine.arcs().iter().filter(|a| a.visible) {
            let samples = arc.samples();
            let brightness = arc.brightness();
            for i in 0..samples.len() - 1 {
                for j in [i, i + 1] {
                    self.arc_scratch.push(FlatVertex {
                        position: samples[j].to_array(),
                        color: [brightness[j]; 3],
                    });
                }
            }
        }
        if !self.arc_scratch.is_empty() {
            self.queue
                .write_buffer(&self.arc_vb, 0, bytemuck::cast_slice(&self.arc_scratch));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.01,
                            g: 0.01,
                            b: 0.02,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            rpass.set_pipeline(&self.point_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..self.instance_scratch.len() as u32);

            if !self.arc_scratch.is_empty() {
                rpass.set_pipeline(&self.arc_pipeline);
                rpass.set_vertex_buffer(0, self.arc_vb.slice(..));
                rpass.draw(0..self.arc_scratch.len() as u32, 0..1);
            }

            rpass.set_pipeline(&self.disc_pipeline);
            rpass.set_vertex_buffer(0, self.marker_vb.slice(..));
            rpass.draw(0..self.marker_vertex_count, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
