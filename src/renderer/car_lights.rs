//! Instanced car-light renderer.
//!
//! One shared tube mesh (slot 0) drawn `2n` times, with per-instance
//! offset, metrics and color in three instance-step vertex buffers (slots
//! 1-3). Bind group 0 is the camera, bind group 1 this set's uniforms.

use glam::Vec3;
use rand::Rng;
use wgpu::util::DeviceExt;

use crate::{
    error::CarLightsError,
    gpu::{
        render_context::RenderContext,
        shader_composer::{ShaderComposer, CAR_LIGHTS_SHADER},
        shader_injection::{inject, DISTORTION_MARKER},
    },
    lights::{
        generate_attributes, generator, CarLightsUniform, DistortionPreset,
        InstanceAttributes, LightInstanceConfig, TubeMesh, TubeVertex,
        UniformState,
    },
    options::FogOptions,
    renderer::pipeline_util,
};

const OFFSET_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![2 => Float32x3];
const METRICS_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![3 => Float32x2];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![4 => Float32x3];

/// Per-instance buffer layouts, slots 1 (offset), 2 (metrics), 3 (color).
fn instance_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    let layout = |components: usize,
                  attributes: &'static [wgpu::VertexAttribute]| {
        wgpu::VertexBufferLayout {
            array_stride: (components * size_of::<f32>())
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes,
        }
    };
    [
        layout(generator::OFFSET_COMPONENTS, &OFFSET_ATTRIBUTES),
        layout(generator::METRICS_COMPONENTS, &METRICS_ATTRIBUTES),
        layout(generator::COLOR_COMPONENTS, &COLOR_ATTRIBUTES),
    ]
}

/// Everything needed to build one light set.
pub struct CarLightsDescriptor<'a> {
    /// Debug label prefix for GPU objects.
    pub label: &'a str,
    /// Road layout, count, colors and speed.
    pub instances: &'a LightInstanceConfig,
    /// Vertex distortion spliced into the shader.
    pub distortion: DistortionPreset,
    /// Tail dimming, 0..1.
    pub fade: f32,
    /// Distance fog.
    pub fog: &'a FogOptions,
    /// World translation of the whole set.
    pub origin: Vec3,
}

/// A set of instanced light streaks.
///
/// Instance attributes are generated and uploaded once in
/// [`new`](Self::new); afterwards only the time uniform changes.
pub struct CarLights {
    pipeline: wgpu::RenderPipeline,
    tube_vertices: wgpu::Buffer,
    tube_indices: wgpu::Buffer,
    index_count: u32,
    offsets: wgpu::Buffer,
    metrics: wgpu::Buffer,
    colors: wgpu::Buffer,
    instance_count: u32,
    uniforms: UniformState,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CarLights {
    /// Generate instance attributes from `rng`, upload them with the shared
    /// tube, and build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError`] if the distortion snippet cannot be
    /// injected or the shader fails to compose.
    pub fn new<R: Rng + ?Sized>(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        desc: &CarLightsDescriptor,
        rng: &mut R,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, CarLightsError> {
        let label = desc.label;
        let device = &context.device;

        let tube = TubeMesh::light_streak();
        let tube_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Tube Vertices")),
                contents: bytemuck::cast_slice(&tube.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let tube_indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Tube Indices")),
                contents: bytemuck::cast_slice(&tube.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let attrs = generate_attributes(desc.instances, rng);
        let instance_count = attrs.instance_count() as u32;
        let [offsets, metrics, colors] =
            Self::create_instance_buffers(device, label, &attrs);

        let uniform = CarLightsUniform::new(
            desc.instances.speed,
            desc.instances.road_depth,
            desc.fade,
            desc.distortion,
        )
        .with_origin(desc.origin.to_array())
        .with_fog(desc.fog.color, desc.fog.near, desc.fog.far);
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Uniforms")),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout = Self::create_bind_group_layout(device, label);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{label} Bind Group")),
        });

        let pipeline = Self::create_pipeline(
            context,
            label,
            desc.distortion,
            &[camera_layout, &bind_group_layout],
            shader_composer,
        )?;

        log::debug!(
            "{label}: {instance_count} instances, distortion {:?}",
            desc.distortion
        );

        Ok(Self {
            pipeline,
            tube_vertices,
            tube_indices,
            index_count: tube.index_count(),
            offsets,
            metrics,
            colors,
            instance_count,
            // GPU already holds the initial block.
            uniforms: {
                let mut state = UniformState::new(uniform);
                let _ = state.take_dirty();
                state
            },
            uniform_buffer,
            bind_group,
        })
    }

    /// One vertex buffer per attribute array. Empty arrays get a single
    /// zeroed element since wgpu cannot bind an empty slice.
    fn create_instance_buffers(
        device: &wgpu::Device,
        label: &str,
        attrs: &InstanceAttributes,
    ) -> [wgpu::Buffer; 3] {
        let create = |name: &str, data: &[f32], components: usize| {
            let zeroed = [0.0_f32; 3];
            let contents = if data.is_empty() {
                &zeroed[..components]
            } else {
                data
            };
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} {name}")),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        [
            create("Offsets", &attrs.offsets, generator::OFFSET_COMPONENTS),
            create("Metrics", &attrs.metrics, generator::METRICS_COMPONENTS),
            create("Colors", &attrs.colors, generator::COLOR_COMPONENTS),
        ]
    }

    fn create_bind_group_layout(
        device: &wgpu::Device,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        label: &str,
        distortion: DistortionPreset,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader_composer: &mut ShaderComposer,
    ) -> Result<wgpu::RenderPipeline, CarLightsError> {
        let source =
            inject(CAR_LIGHTS_SHADER, DISTORTION_MARKER, distortion.snippet())?;
        let shader = shader_composer.compose(
            &context.device,
            &format!("{label} Shader"),
            &source,
            "car_lights.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts,
                push_constant_ranges: &[],
            },
        );

        let [offsets, metrics, colors] = instance_layouts();
        Ok(context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some(&format!("{label} Pipeline")),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[TubeVertex::layout(), offsets, metrics, colors],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::additive_fragment_targets(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_read_only_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        ))
    }

    /// Set the elapsed-time uniform. Uploaded on the next
    /// [`flush`](Self::flush).
    pub fn update(&mut self, elapsed: f32) {
        self.uniforms.set_time(elapsed);
    }

    /// Current time uniform.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.uniforms.value().time
    }

    /// Upload the uniform block if it changed since the last flush.
    pub fn flush(&mut self, queue: &wgpu::Queue) {
        if let Some(value) = self.uniforms.take_dirty() {
            queue.write_buffer(
                &self.uniform_buffer,
                0,
                bytemuck::bytes_of(value),
            );
        }
    }

    /// Number of light instances drawn (two per car).
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Draw every instance. Skipped when the set is empty.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.tube_vertices.slice(..));
        render_pass.set_vertex_buffer(1, self.offsets.slice(..));
        render_pass.set_vertex_buffer(2, self.metrics.slice(..));
        render_pass.set_vertex_buffer(3, self.colors.slice(..));
        render_pass.set_index_buffer(
            self.tube_indices.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(
            0..self.index_count,
            0,
            0..self.instance_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layouts_match_attribute_widths() {
        let [offsets, metrics, colors] = instance_layouts();
        assert_eq!(offsets.array_stride, 12);
        assert_eq!(metrics.array_stride, 8);
        assert_eq!(colors.array_stride, 12);
        for layout in [&offsets, &metrics, &colors] {
            assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        }
        assert_eq!(offsets.attributes[0].shader_location, 2);
        assert_eq!(metrics.attributes[0].shader_location, 3);
        assert_eq!(colors.attributes[0].shader_location, 4);
    }

    #[test]
    fn tube_layout_is_per_vertex() {
        let layout = TubeVertex::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 2);
    }
}
