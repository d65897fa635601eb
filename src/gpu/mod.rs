//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the depth target, and WGSL
//! shader preprocessing and composition.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Marker-based snippet splicing over shader source text.
pub mod shader_injection;
/// Depth render target sized to the surface.
pub mod texture;
