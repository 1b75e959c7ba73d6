//! Scene renderer: one Blinn-Phong pipeline over the box entities
//!
//! Per-frame uniforms carry the view-projection matrix, camera position, and
//! the scene's fixed lighting constants; per-object uniforms carry the model
//! matrix and color. Entities are drawn in spawn order.

use crate::camera::Camera;
use crate::context::{RenderContext, RenderError};
use crate::gpu_mesh::GpuMesh;
use crate::primitives::{create_box_mesh, Vertex};
use basalt_core::{Color, EntityId, Transform, Vec3};
use basalt_ecs::SceneWorld;
use bytemuck::{Pod, Zeroable};

/// Fixed lighting constants pushed into the shader every frame
const LIGHT_DIR: [f32; 3] = [-5.0, 6.0, 7.0];
const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// The renderable component: an untextured colored box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxVisual {
    pub half_extents: Vec3,
    pub color: Color,
}

/// Per-frame uniform buffer data (bind group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    _pad0: f32,
    light_dir: [f32; 3],
    _pad1: f32,
    light_color: [f32; 3],
    _pad2: f32,
}

/// Per-object uniform buffer data (bind group 1)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

struct RenderObject {
    entity: EntityId,
    mesh: GpuMesh,
    color: Color,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws every entity carrying a `BoxVisual`
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    object_bind_group_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    objects: Vec<RenderObject>,
}

impl SceneRenderer {
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blinn-Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_layout_entry(0)],
                label: Some("Frame Bind Group Layout"),
            });

        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[uniform_layout_entry(0)],
                label: Some("Object Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("Frame Bind Group"),
        });

        Self {
            pipeline,
            object_bind_group_layout,
            frame_buffer,
            frame_bind_group,
            objects: Vec::new(),
        }
    }

    /// Build GPU resources for every `BoxVisual` entity, in spawn order.
    /// Call once after the scene is constructed.
    pub fn upload_scene(&mut self, context: &RenderContext, world: &SceneWorld) {
        self.objects.clear();

        for entity in world.entities() {
            let Ok(visual) = world.get::<BoxVisual>(entity) else {
                continue;
            };

            let label = world.name(entity).unwrap_or("entity").to_string();
            let mesh = GpuMesh::upload(
                &context.device,
                &create_box_mesh(visual.half_extents.to_array()),
                &label,
            );

            let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Uniforms")),
                size: std::mem::size_of::<ObjectUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &self.object_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
                label: Some(&format!("{label} Bind Group")),
            });

            self.objects.push(RenderObject {
                entity,
                mesh,
                color: visual.color,
                uniform_buffer,
                bind_group,
            });
        }
    }

    /// Number of uploaded renderable objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Render the scene for the current camera and entity transforms
    pub fn render(
        &self,
        context: &RenderContext,
        camera: &Camera,
        world: &SceneWorld,
        view: &wgpu::TextureView,
    ) -> Result<(), RenderError> {
        let frame = FrameUniforms {
            view_proj: camera.view_projection_matrix(),
            camera_pos: camera.position_array(),
            _pad0: 0.0,
            light_dir: LIGHT_DIR,
            _pad1: 0.0,
            light_color: LIGHT_COLOR,
            _pad2: 0.0,
        };
        context
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        for object in &self.objects {
            let transform = world
                .get::<Transform>(object.entity)
                .unwrap_or(Transform::IDENTITY);
            let uniforms = ObjectUniforms {
                model: transform.to_matrix(),
                color: object.color.to_array(),
            };
            context
                .queue
                .write_buffer(&object.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for object in &self.objects {
                pass.set_bind_group(1, &object.bind_group, &[]);
                pass.set_vertex_buffer(0, object.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    object.mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..object.mesh.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
