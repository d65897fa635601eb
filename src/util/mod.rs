//! Small shared utilities.

/// Frame pacing, smoothed FPS and periodic FPS reports.
pub mod frame_timing;
