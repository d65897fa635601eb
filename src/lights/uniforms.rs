use bytemuck::{Pod, Zeroable};

use super::distortion::DistortionPreset;

/// Uniform block for one light set. Must match `CarLightsUniform` in
/// `car_lights.wgsl` field for field (80 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CarLightsUniform {
    /// World translation of the whole set.
    pub origin: [f32; 3],
    /// Elapsed scene time in seconds.
    pub time: f32,
    /// Color the streaks fade into with distance.
    pub fog_color: [f32; 3],
    /// Streak speed in world units per second.
    pub speed: f32,
    /// Distortion frequencies (xyz used).
    pub distortion_freq: [f32; 4],
    /// Distortion amplitudes (xyz used).
    pub distortion_amp: [f32; 4],
    /// Distance after which a streak wraps back to the far end.
    pub travel_length: f32,
    /// How much the tail end of a streak dims, 0..1.
    pub fade: f32,
    /// Distance where fog starts.
    pub fog_near: f32,
    /// Distance where fog fully hides a streak.
    pub fog_far: f32,
}

impl CarLightsUniform {
    /// Uniform block with time zero and the given distortion preset.
    #[must_use]
    pub fn new(
        speed: f32,
        travel_length: f32,
        fade: f32,
        distortion: DistortionPreset,
    ) -> Self {
        let (distortion_freq, distortion_amp) = distortion.params();
        Self {
            origin: [0.0; 3],
            time: 0.0,
            fog_color: [0.0; 3],
            speed,
            distortion_freq,
            distortion_amp,
            travel_length,
            fade: fade.clamp(0.0, 1.0),
            fog_near: 0.0,
            fog_far: travel_length,
        }
    }

    /// Translate the whole set.
    #[must_use]
    pub fn with_origin(mut self, origin: [f32; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Fade streaks into `color` between `near` and `far`.
    #[must_use]
    pub fn with_fog(mut self, color: [f32; 3], near: f32, far: f32) -> Self {
        self.fog_color = color;
        self.fog_near = near;
        self.fog_far = far;
        self
    }
}

/// CPU copy of a uniform block plus a dirty flag.
///
/// Writers mutate through the setters; the renderer uploads only when the
/// block has changed since the last [`take_dirty`](Self::take_dirty).
#[derive(Debug, Clone)]
pub struct UniformState {
    value: CarLightsUniform,
    dirty: bool,
}

impl UniformState {
    /// Wrap `value`. Starts dirty so the first flush uploads it.
    #[must_use]
    pub fn new(value: CarLightsUniform) -> Self {
        Self { value, dirty: true }
    }

    /// Set the elapsed time and mark the block for upload.
    pub fn set_time(&mut self, time: f32) {
        self.value.time = time;
        self.dirty = true;
    }

    /// Current uniform values.
    #[must_use]
    pub fn value(&self) -> &CarLightsUniform {
        &self.value
    }

    /// Whether an upload is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the block if it needs uploading and clear the flag.
    pub fn take_dirty(&mut self) -> Option<&CarLightsUniform> {
        if self.dirty {
            self.dirty = false;
            Some(&self.value)
        } else {
            None
        }
    }
}
