use wgpu::util::DeviceExt;

use crate::galaxy::PointField;
use crate::gpu::render_context::RenderContext;

/// Additive blend: overlapping sprites accumulate brightness, so dense arm
/// cores glow without any depth sorting.
const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Sprite sizing parameters, padded to a 16-byte uniform slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointParams {
    /// x = sprite side length in world units; yzw unused.
    size: [f32; 4],
}

/// GPU resources tied to one displayed field. Replaced wholesale on
/// regeneration; the superseded buffers are destroyed immediately rather
/// than waiting for the driver to notice they are unreferenced.
struct FieldBuffers {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

/// Renders a [`PointField`] as camera-facing quads with a circular soft
/// falloff, sized in world units so sprites shrink with distance.
///
/// The two generator output buffers are uploaded as-is (flat `f32` storage
/// buffers); the shader assembles positions and colors by instance index.
pub struct PointsRenderer {
    pipeline: wgpu::RenderPipeline,
    field_layout: wgpu::BindGroupLayout,
    params_buffer: wgpu::Buffer,
    field: Option<FieldBuffers>,
}

impl PointsRenderer {
    /// Build the point pipeline against the surface format.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/points.wgsl"
        ));

        let field_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Field Bind Group Layout"),
                entries: &[
                    storage_entry(0),
                    storage_entry(1),
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Points Pipeline Layout"),
                bind_group_layouts: &[camera_layout, &field_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Points Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(ADDITIVE_BLEND),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                // No depth: sprites are order-independent under additive
                // blending and the points are the only scene content.
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Point Params Buffer"),
                contents: bytemuck::cast_slice(&[PointParams {
                    size: [0.0; 4],
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        Self {
            pipeline,
            field_layout,
            params_buffer,
            field: None,
        }
    }

    /// Replace the displayed field, releasing the previous GPU buffers.
    ///
    /// An empty field clears the display without allocating (zero-sized
    /// bindings are not valid).
    pub fn display_field(
        &mut self,
        context: &RenderContext,
        field: &PointField,
        point_size: f32,
    ) {
        if let Some(old) = self.field.take() {
            old.positions.destroy();
            old.colors.destroy();
        }

        context.queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[PointParams {
                size: [point_size, 0.0, 0.0, 0.0],
            }]),
        );

        if field.is_empty() {
            return;
        }

        let positions = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Field Position Buffer"),
                contents: bytemuck::cast_slice(field.positions()),
                usage: wgpu::BufferUsages::STORAGE,
            },
        );
        let colors = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Field Color Buffer"),
                contents: bytemuck::cast_slice(field.colors()),
                usage: wgpu::BufferUsages::STORAGE,
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &self.field_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: positions.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: colors.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: self.params_buffer.as_entire_binding(),
                        },
                    ],
                    label: Some("Field Bind Group"),
                });

        self.field = Some(FieldBuffers {
            positions,
            colors,
            bind_group,
            count: field.len() as u32,
        });
    }

    /// Number of points currently resident on the GPU.
    pub fn point_count(&self) -> u32 {
        self.field.as_ref().map_or(0, |f| f.count)
    }

    /// Record the point draw into the given render pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        let Some(field) = &self.field else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &field.bind_group, &[]);
        render_pass.draw(0..6, 0..field.count);
    }
}

fn storage_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
