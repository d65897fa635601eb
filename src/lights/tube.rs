use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

/// Segments along the tube axis.
pub const TUBULAR_SEGMENTS: u32 = 25;
/// Segments around the tube circumference.
pub const RADIAL_SEGMENTS: u32 = 8;

/// Tube mesh vertex. Must match `VertexInput` in `car_lights.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    /// Position on the unit tube (radius 1, z in `[-1, 0]`).
    pub position: [f32; 3],
    /// `x` runs 0..1 along the axis, `y` 0..1 around it.
    pub uv: [f32; 2],
}

impl TubeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Per-vertex buffer layout (slot 0).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Open-ended tube of radius 1 around the segment `(0,0,0) → (0,0,-1)`.
///
/// Instances scale it by `(radius, radius, length)` in the vertex shader, so
/// one mesh serves every light.
#[derive(Debug, Clone)]
pub struct TubeMesh {
    /// Ring-major vertices, `radial + 1` per ring (seam duplicated).
    pub vertices: Vec<TubeVertex>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl TubeMesh {
    /// Tube with the light-streak resolution.
    #[must_use]
    pub fn light_streak() -> Self {
        Self::new(TUBULAR_SEGMENTS, RADIAL_SEGMENTS)
    }

    /// Tube with `tubular` rings along the axis and `radial` quads around.
    #[must_use]
    pub fn new(tubular: u32, radial: u32) -> Self {
        let tubular = tubular.max(1);
        let radial = radial.max(3);

        let mut vertices =
            Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
        for i in 0..=tubular {
            let t = i as f32 / tubular as f32;
            for j in 0..=radial {
                let v = j as f32 / radial as f32;
                let (sin, cos) = (v * TAU).sin_cos();
                vertices.push(TubeVertex {
                    position: [-cos, sin, -t],
                    uv: [t, v],
                });
            }
        }

        let ring = radial + 1;
        let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
        for i in 1..=tubular {
            for j in 1..=radial {
                let a = ring * (i - 1) + (j - 1);
                let b = ring * i + (j - 1);
                let c = ring * i + j;
                let d = ring * (i - 1) + j;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// Number of indices to draw.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
