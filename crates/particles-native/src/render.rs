//! wgpu renderer for the particle field.
//!
//! Particles are drawn as instanced camera-facing quads with additive
//! blending into an HDR target, followed by a bloom chain
//! (bright pass, horizontal blur, vertical blur, composite to the swapchain).

mod helpers;
mod post;
mod targets;

use particles_core::{BloomParams, Camera, RenderFrame, CLEAR_COLOR, POINT_OPACITY, POINT_SIZE};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::{RenderTargets, HDR_FORMAT};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ParticleUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    particle_count: usize,
    targets: RenderTargets,
    post: PostResources,
    post_bgs: PostBindGroups,
    bloom: BloomParams,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        particle_count: usize,
        bloom: BloomParams,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
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
        log::info!("[gpu] adapter: {}", adapter.get_info().name);
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

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(particles_core::PARTICLES_WGSL.into()),
        });
        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(particles_core::POST_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad corners for two triangles, centered on the particle
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_positions"),
            size: (std::mem::size_of::<[f32; 3]>() * particle_count.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particle_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particle_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: particle centers, straight from the animator buffer
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 3) as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &particle_shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            // additive sprites, no depth writes
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_bgs = post.bind_groups(&device, &targets);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            instance_vb,
            particle_count,
            targets,
            post,
            post_bgs,
            bloom,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0] as f64,
                g: CLEAR_COLOR[1] as f64,
                b: CLEAR_COLOR[2] as f64,
                a: 1.0,
            },
            width,
            height,
        })
    }

    pub fn window(&self) -> &'w winit::window::Window {
        self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        if self.targets.hdr_extent() != (self.width, self.height) {
            self.targets.recreate(&self.device, self.width, self.height);
            self.post_bgs = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    pub fn reconfigure(&mut self) {
        self.resize(self.window.inner_size());
    }

    pub fn render(&mut self, frame: &RenderFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        let surface_tex = self.surface.get_current_texture()?;
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = Camera::looking_at_field(self.width as f32 / self.height as f32);
        let c = frame.color;
        let uniforms = ParticleUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: frame.rotation.matrix().to_cols_array_2d(),
            color: [c.r, c.g, c.b, POINT_OPACITY],
            params: [POINT_SIZE, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let drawn = frame.particle_count().min(self.particle_count);
        self.queue.write_buffer(
            &self.instance_vb,
            0,
            bytemuck::cast_slice(&frame.positions[..drawn * 3]),
        );

        self.post.write_uniforms(
            &self.queue,
            PostUniforms {
                resolution: self.targets.bloom_extent(),
                blur_dir: [0.0, 0.0],
                bloom_strength: self.bloom.strength,
                threshold: self.bloom.threshold,
                radius: self.bloom.radius,
                _pad: 0.0,
            },
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particles_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..drawn as u32);
        }

        // bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_bgs.from_hdr,
            None,
        );
        // horizontal blur bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bgs.from_bloom_a,
            None,
        );
        // vertical blur bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_bgs.from_bloom_b,
            None,
        );
        // composite scene + bloom to the swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_bgs.from_hdr,
            Some(&self.post_bgs.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
