use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;

use crate::geometry::Vertex;
use crate::paint::Side;
use crate::render::{FrameUniforms, RenderCtx, RenderTarget};
use crate::scene::{DrawList, GeometryId, MeshCmd};

use super::common::{
    GlobalsBinding, PipelineKey, alpha_blend, depth_state, ensure_vertex_capacity, multisample,
    pipeline_key,
};

/// Renderer for `DrawCmd::Mesh`.
///
/// Geometries are uploaded once per `DrawList` geometry and instanced; the
/// instance buffer is rebuilt only when the draw list revision changes.
/// Instances are batched by side (single-sided first, then double-sided) and
/// geometry, with translucent instances drawn after opaque ones.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_key: Option<PipelineKey>,
    front_pipeline: Option<wgpu::RenderPipeline>,
    double_pipeline: Option<wgpu::RenderPipeline>,

    globals: Option<GlobalsBinding>,

    meshes: Vec<GpuMesh>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    batches: Vec<Batch>,
    uploaded_revision: Option<u64>,
}

struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

/// Contiguous run of instances sharing a pipeline and geometry.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    side: Side,
    geometry: GeometryId,
    instances: Range<u32>,
}

impl MeshRenderer {
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
        self.ensure_geometry_buffers(ctx, draw_list);
        self.ensure_instances(ctx, draw_list);

        if self.batches.is_empty() {
            return;
        }

        let Some(globals) = self.globals.as_ref() else { return };
        globals.write(ctx, uniforms);

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        let Some(front) = self.front_pipeline.as_ref() else { return };
        let Some(double) = self.double_pipeline.as_ref() else { return };

        let mut rpass = target.begin_load_pass("plato mesh pass");
        rpass.set_bind_group(0, &globals.bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        let mut bound_side = None;
        for batch in &self.batches {
            let Some(mesh) = self.meshes.get(batch.geometry.index()) else { continue };
            if mesh.index_count == 0 {
                continue;
            }
            if bound_side != Some(batch.side) {
                rpass.set_pipeline(match batch.side {
                    Side::Front => front,
                    Side::Double => double,
                });
                bound_side = Some(batch.side);
            }
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = pipeline_key(ctx);
        if self.pipeline_key == Some(key) && self.front_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plato mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let globals = GlobalsBinding::new(ctx, "plato mesh globals");

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plato mesh pipeline layout"),
            bind_group_layouts: &[&globals.layout],
            immediate_size: 0,
        });

        let build = |label: &str, cull_mode: Option<wgpu::Face>| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout(), MeshInstance::layout()],
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
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(depth_state(ctx)),
                multisample: multisample(ctx),
                multiview_mask: None,
                cache: None,
            })
        };

        self.front_pipeline = Some(build("plato mesh pipeline (front)", Some(wgpu::Face::Back)));
        self.double_pipeline = Some(build("plato mesh pipeline (double)", None));
        self.globals = Some(globals);
        self.pipeline_key = Some(key);
    }

    fn ensure_geometry_buffers(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList) {
        if self.meshes.len() > draw_list.geometries().len() {
            // The list was cleared and rebuilt; ids no longer match.
            self.meshes.clear();
        }

        for (i, mesh) in draw_list.geometries().iter().enumerate().skip(self.meshes.len()) {
            let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plato mesh vbo"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("plato mesh ibo"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            log::trace!("uploaded geometry {i}: {} triangles", mesh.triangle_count());
            self.meshes.push(GpuMesh {
                vbo,
                ibo,
                index_count: mesh.indices.len() as u32,
            });
        }
    }

    fn ensure_instances(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList) {
        if self.uploaded_revision == Some(draw_list.revision()) {
            return;
        }

        let (instances, batches) = build_batches(draw_list);
        self.batches = batches;
        self.uploaded_revision = Some(draw_list.revision());
        if instances.is_empty() {
            return;
        }

        ensure_vertex_capacity(
            ctx,
            &mut self.instance_vbo,
            &mut self.instance_capacity,
            instances.len(),
            std::mem::size_of::<MeshInstance>(),
            "plato mesh instance vbo",
        );
        if let Some(vbo) = self.instance_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&instances));
        }
    }
}

/// Sorts mesh commands into draw batches and packs their instance data.
fn build_batches(draw_list: &DrawList) -> (Vec<MeshInstance>, Vec<Batch>) {
    let mut cmds: Vec<&MeshCmd> = draw_list
        .meshes()
        .filter(|m| draw_list.geometry(m.geometry).is_some())
        .collect();
    cmds.sort_by_key(|m| (!m.material.color.is_opaque(), m.material.side, m.geometry));

    let instances: Vec<MeshInstance> = cmds.iter().map(|m| MeshInstance::new(m)).collect();

    let mut batches: Vec<Batch> = Vec::new();
    for (i, m) in cmds.iter().enumerate() {
        let i = i as u32;
        match batches.last_mut() {
            Some(b) if b.side == m.material.side && b.geometry == m.geometry && b.instances.end == i => {
                b.instances.end = i + 1;
            }
            _ => batches.push(Batch {
                side: m.material.side,
                geometry: m.geometry,
                instances: i..i + 1,
            }),
        }
    }

    (instances, batches)
}

// ── GPU types ─────────────────────────────────────────────────────────────

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x3  // normal
];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// Instance data layout (128 bytes):
///
///  offset   0  model   4 × [f32; 4]   loc 2..=5
///  offset  64  normal  3 × [f32; 4]   loc 6..=8  (inverse-transpose of model 3×3)
///  offset 112  color   [f32; 4]       loc 9
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshInstance {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
    color: [f32; 4],
}

impl MeshInstance {
    const ATTRS: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4
    ];

    fn new(cmd: &MeshCmd) -> Self {
        let n = normal_matrix(cmd.transform);
        Self {
            model: cmd.transform.to_cols_array_2d(),
            normal: [n.x_axis.extend(0.0), n.y_axis.extend(0.0), n.z_axis.extend(0.0)]
                .map(|c| c.to_array()),
            color: cmd.material.color.to_array(),
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Inverse-transpose of the upper 3×3; falls back to the plain 3×3 when the
/// transform is singular (e.g. a zero radius).
fn normal_matrix(transform: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(transform);
    if m.determinant().abs() <= f32::EPSILON {
        m
    } else {
        m.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::{disk, uv_sphere};
    use crate::paint::{Color, Material};

    #[test]
    fn instance_layout_is_128_bytes() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), 128);
    }

    #[test]
    fn batches_group_by_side_and_geometry() {
        let mut list = DrawList::new();
        let sphere = list.add_geometry(uv_sphere(8, 4));
        let flat = list.add_geometry(disk(8));
        let red = Color::from_linear(1.0, 0.0, 0.0, 1.0);

        list.push_mesh(flat, Mat4::IDENTITY, Material::double_sided(red));
        list.push_mesh(sphere, Mat4::IDENTITY, Material::front(red));
        list.push_mesh(flat, Mat4::IDENTITY, Material::double_sided(red));
        list.push_mesh(sphere, Mat4::IDENTITY, Material::front(red));

        let (instances, batches) = build_batches(&list);
        assert_eq!(instances.len(), 4);
        assert_eq!(
            batches,
            vec![
                Batch { side: Side::Front, geometry: sphere, instances: 0..2 },
                Batch { side: Side::Double, geometry: flat, instances: 2..4 },
            ]
        );
    }

    #[test]
    fn translucent_instances_come_last() {
        let mut list = DrawList::new();
        let sphere = list.add_geometry(uv_sphere(8, 4));
        list.push_mesh(sphere, Mat4::IDENTITY, Material::front(Color::from_linear(1.0, 1.0, 1.0, 0.5)));
        list.push_mesh(sphere, Mat4::IDENTITY, Material::front(Color::WHITE));

        let (instances, batches) = build_batches(&list);
        assert_eq!(instances[0].color[3], 1.0);
        assert_eq!(batches.len(), 1);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let n = normal_matrix(Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)));
        assert_eq!(n * Vec3::X, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn singular_transform_keeps_a_finite_normal_matrix() {
        let n = normal_matrix(Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0)));
        assert!(n.is_finite());
    }
}
