//! Shared GPU state used by the mesh and line renderers.

use super::uniforms::{FrameUniforms, GlobalsUniform};
use super::RenderCtx;

// ── blend / depth ─────────────────────────────────────────────────────────

pub(super) fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState::ALPHA_BLENDING
}

pub(super) fn depth_state(ctx: &RenderCtx<'_>) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: ctx.depth_format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    }
}

pub(super) fn multisample(ctx: &RenderCtx<'_>) -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: ctx.sample_count,
        ..Default::default()
    }
}

// ── globals uniform ───────────────────────────────────────────────────────

/// Pipeline cache key: pipelines are rebuilt when either component changes.
pub(super) type PipelineKey = (wgpu::TextureFormat, u32);

pub(super) fn pipeline_key(ctx: &RenderCtx<'_>) -> PipelineKey {
    (ctx.surface_format, ctx.sample_count)
}

/// Uniform buffer + bind group holding one renderer's copy of the frame globals.
pub(super) struct GlobalsBinding {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

impl GlobalsBinding {
    pub fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<GlobalsUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        Self { layout, bind_group, ubo }
    }

    pub fn write(&self, ctx: &RenderCtx<'_>, uniforms: &FrameUniforms) {
        ctx.queue
            .write_buffer(&self.ubo, 0, bytemuck::bytes_of(&uniforms.to_raw()));
    }
}

/// Grows `buffer` to hold at least `required` elements of `stride` bytes.
///
/// Capacity grows to the next power of two (minimum 64 elements).
pub(super) fn ensure_vertex_capacity(
    ctx: &RenderCtx<'_>,
    buffer: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    stride: usize,
    label: &str,
) {
    if required <= *capacity && buffer.is_some() {
        return;
    }
    let new_cap = required.next_power_of_two().max(64);
    *buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_cap * stride) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}
