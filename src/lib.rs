// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Instanced car light streaks for a wgpu road scene.
//!
//! Each car on the road is drawn as a pair of glowing tubes that stream
//! along the road over time. All tubes share one base mesh; per-car
//! placement, size and color live in per-instance vertex buffers generated
//! once at construction, and only the time uniform changes per frame.
//!
//! # Key entry points
//!
//! - [`lights::generate_attributes`] - CPU-side instance attribute
//!   generation (pure, seeded, GPU-free)
//! - [`renderer::car_lights::CarLights`] - the GPU draw component
//! - [`engine::RoadSceneEngine`] - a complete scene with two light sets
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Shaders
//!
//! WGSL sources are embedded with `include_str!` and composed through
//! naga-oil so shared modules can be pulled in with `#import`. The vertex
//! distortion is spliced into the source text at a marker line before
//! composition (see [`gpu::shader_injection`]).

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod lights;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::CarLightsError;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
