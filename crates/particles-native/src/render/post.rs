use super::helpers;
use super::targets::{RenderTargets, BLOOM_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
    pub(crate) radius: f32,
    pub(crate) _pad: f32,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    // One buffer per blur direction: queue writes land before the encoder
    // runs, so passes cannot share a rewritten buffer.
    pub(crate) uniforms_h: wgpu::Buffer,
    pub(crate) uniforms_v: wgpu::Buffer,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the offscreen targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) from_hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let uniform_buffer = |label: &str| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    };
    let uniforms_h = uniform_buffer("post_uniforms_h");
    let uniforms_v = uniform_buffer("post_uniforms_v");
    let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let bloom_target = wgpu::ColorTargetState {
        format: BLOOM_FORMAT,
        blend: None,
        write_mask: wgpu::ColorWrites::ALL,
    };
    let bright_pipeline = helpers::fullscreen_pipeline(
        device,
        &pl_bright_blur,
        post_shader,
        "fs_bright",
        bloom_target.clone(),
    );
    let blur_pipeline =
        helpers::fullscreen_pipeline(device, &pl_bright_blur, post_shader, "fs_blur", bloom_target);
    let composite_pipeline = helpers::fullscreen_pipeline(
        device,
        &pl_composite,
        post_shader,
        "fs_composite",
        wgpu::ColorTargetState {
            format: swap_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        },
    );

    PostResources {
        bgl0,
        bgl1,
        sampler,
        uniforms_h,
        uniforms_v,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

impl PostResources {
    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, base: PostUniforms) {
        let h = PostUniforms {
            blur_dir: [1.0, 0.0],
            ..base
        };
        let v = PostUniforms {
            blur_dir: [0.0, 1.0],
            ..base
        };
        queue.write_buffer(&self.uniforms_h, 0, bytemuck::bytes_of(&h));
        queue.write_buffer(&self.uniforms_v, 0, bytemuck::bytes_of(&v));
    }

    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let h = Some(&self.uniforms_h);
        let v = Some(&self.uniforms_v);
        PostBindGroups {
            from_hdr: helpers::texture_bind_group(
                device,
                "bg_hdr",
                &self.bgl0,
                &targets.hdr_view,
                &self.sampler,
                h,
            ),
            from_bloom_a: helpers::texture_bind_group(
                device,
                "bg_from_bloom_a",
                &self.bgl0,
                &targets.bloom_a_view,
                &self.sampler,
                h,
            ),
            from_bloom_b: helpers::texture_bind_group(
                device,
                "bg_from_bloom_b",
                &self.bgl0,
                &targets.bloom_b_view,
                &self.sampler,
                v,
            ),
            bloom_a_only: helpers::texture_bind_group(
                device,
                "bg_bloom_a_only",
                &self.bgl1,
                &targets.bloom_a_view,
                &self.sampler,
                None,
            ),
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
    drop(r);
}
