use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera position.
/// Must match `CameraUniform` in `modules/camera.wgsl`.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.6,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn road_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 8.0, -5.0),
            target: Vec3::new(0.0, 0.0, -80.0),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 90.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    #[test]
    fn uniform_layout_is_80_bytes() {
        assert_eq!(size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn point_down_the_road_projects_inside_clip_space() {
        let camera = road_camera();
        let clip = camera.build_matrix() * Vec4::new(0.0, 0.0, -80.0, 1.0);
        let ndc = clip / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn point_behind_camera_has_negative_w() {
        let camera = road_camera();
        let clip = camera.build_matrix() * Vec4::new(0.0, 8.0, 50.0, 1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn uniform_tracks_camera_eye() {
        let camera = road_camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        assert_eq!(uniform.position, [0.0, 8.0, -5.0]);
        assert_eq!(uniform.aspect, 16.0 / 9.0);
    }
}
