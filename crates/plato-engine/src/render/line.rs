use bytemuck::{Pod, Zeroable};

use crate::render::{FrameUniforms, RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::common::{
    GlobalsBinding, PipelineKey, alpha_blend, depth_state, ensure_vertex_capacity, multisample,
    pipeline_key,
};

/// Renderer for `DrawCmd::Line`.
///
/// Segments are drawn as one-pixel `LineList` primitives, depth-tested against
/// the meshes. Vertex data is re-uploaded only when the draw list changes.
#[derive(Default)]
pub struct LineRenderer {
    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,
    globals: Option<GlobalsBinding>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
    vertex_count: u32,
    uploaded_revision: Option<u64>,

    warned_width: bool,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        uniforms: &FrameUniforms,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_vertices(ctx, draw_list);

        if self.vertex_count == 0 {
            return;
        }

        let Some(globals) = self.globals.as_ref() else { return };
        globals.write(ctx, uniforms);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut rpass = target.begin_load_pass("plato line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &globals.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = pipeline_key(ctx);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plato line shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.wgsl").into()),
        });

        let globals = GlobalsBinding::new(ctx, "plato line globals");

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plato line pipeline layout"),
            bind_group_layouts: &[&globals.layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("plato line pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[LineVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_state(ctx)),
            multisample: multisample(ctx),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline = Some(pipeline);
        self.globals = Some(globals);
        self.pipeline_key = Some(key);
    }

    fn ensure_vertices(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList) {
        if self.uploaded_revision == Some(draw_list.revision()) {
            return;
        }
        self.uploaded_revision = Some(draw_list.revision());

        let vertices = line_vertices(draw_list);
        self.vertex_count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        if !self.warned_width && draw_list.lines().any(|l| l.width != 1.0) {
            log::debug!("line widths other than 1 are drawn one pixel wide");
            self.warned_width = true;
        }

        ensure_vertex_capacity(
            ctx,
            &mut self.vbo,
            &mut self.vbo_capacity,
            vertices.len(),
            std::mem::size_of::<LineVertex>(),
            "plato line vbo",
        );
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));
        }
    }
}

fn line_vertices(draw_list: &DrawList) -> Vec<LineVertex> {
    draw_list
        .lines()
        .flat_map(|l| {
            let color = l.color.to_array();
            [
                LineVertex { position: l.start.to_array(), color },
                LineVertex { position: l.end.to_array(), color },
            ]
        })
        .collect()
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Line vertex layout (28 bytes): position `[f32; 3]` loc 0, color `[f32; 4]` loc 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

impl LineVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
