//! Camera system for the road scene.
//!
//! A fixed perspective camera hovering over the road and looking down it,
//! plus the GPU uniform it feeds.

/// Camera GPU resources and option-driven placement.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
