//! Rendering subsystems for the road scene.
//!
//! Contains the instanced car-light renderer and shared pipeline state.

pub mod car_lights;
pub(crate) mod pipeline_util;
