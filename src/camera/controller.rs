use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::{
    camera::core::{Camera, CameraUniform},
    gpu::render_context::RenderContext,
    options::CameraOptions,
};

/// Owns the road camera and its uniform buffer / bind group (group 0 of the
/// light pipeline).
pub struct CameraController {
    /// Current camera placement and projection.
    pub camera: Camera,
    /// CPU copy of the GPU uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout shared with the light pipelines.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`buffer`](Self::buffer).
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera from options and upload its first uniform.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let aspect =
            context.config.width as f32 / context.config.height.max(1) as f32;
        let camera = camera_from_options(options, aspect);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Re-place the camera from new options, keeping the aspect ratio.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera = camera_from_options(options, self.camera.aspect);
    }

    /// Push the current camera state to the GPU.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update the aspect ratio for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }
}

/// Camera hovering over the road center, looking down -z.
#[must_use]
pub fn camera_from_options(options: &CameraOptions, aspect: f32) -> Camera {
    Camera {
        eye: Vec3::new(0.0, options.height, options.z),
        target: Vec3::new(0.0, 0.0, options.z - options.look_ahead),
        up: Vec3::Y,
        aspect,
        fovy: options.fovy,
        znear: options.znear,
        zfar: options.zfar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_down_negative_z() {
        let options = CameraOptions::default();
        let camera = camera_from_options(&options, 1.5);
        let forward = (camera.target - camera.eye).normalize();
        assert!(forward.z < 0.0);
        assert!(forward.y < 0.0);
        assert_eq!(camera.aspect, 1.5);
        assert_eq!(camera.eye.y, options.height);
    }
}
