pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub(crate) const BLOOM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the render pipeline.
///
/// - `hdr_*` hold the additive particle scene in Rgba16Float.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = offscreen(device, "hdr_tex", (width, height), HDR_FORMAT);
        let half = bloom_size(width, height);
        let (bloom_a, bloom_a_view) = offscreen(device, "bloom_a", half, BLOOM_FORMAT);
        let (bloom_b, bloom_b_view) = offscreen(device, "bloom_b", half, BLOOM_FORMAT);
        Self {
            hdr_tex,
            hdr_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    /// Half-resolution size of the bloom buffers.
    pub(crate) fn bloom_extent(&self) -> [f32; 2] {
        let size = self.bloom_a.size();
        [size.width as f32, size.height as f32]
    }

    pub(crate) fn hdr_extent(&self) -> (u32, u32) {
        let size = self.hdr_tex.size();
        (size.width, size.height)
    }
}

fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

/// Render target that later passes sample from.
fn offscreen(
    device: &wgpu::Device,
    label: &str,
    (width, height): (u32, u32),
    format: wgpu::TextureFormat,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = tex.create_view(&Default::default());
    (tex, view)
}
