//! CPU-side data for instanced car light streaks.
//!
//! Everything here is GPU-free so it can be generated and tested without a
//! device: per-instance attribute arrays, the shared tube mesh, vertex
//! distortion snippets and the uniform block layout.

/// Lane layout and light-set input parameters.
pub mod config;
/// WGSL vertex-distortion snippets spliced into the light shader.
pub mod distortion;
/// Per-instance offset / metrics / color generation.
pub mod generator;
/// The shared open tube mesh every light instance is drawn from.
pub mod tube;
/// GPU uniform block and its per-frame dirty tracking.
pub mod uniforms;

pub use config::{LaneCentering, LaneMode, LightColors, LightInstanceConfig};
pub use distortion::DistortionPreset;
pub use generator::{generate_attributes, InstanceAttributes};
pub use tube::{TubeMesh, TubeVertex};
pub use uniforms::{CarLightsUniform, UniformState};
