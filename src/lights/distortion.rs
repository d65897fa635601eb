use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Vertex distortion applied to every streak as a function of how far down
/// the road it is.
///
/// Each preset is a WGSL snippet defining
/// `fn get_distortion(progress: f32) -> vec3<f32>`. Snippets read
/// `uniforms.time`, `uniforms.distortion_freq` and `uniforms.distortion_amp`
/// from the light shader, and subtract the value at the camera's own
/// progress so the road stays put right in front of the viewer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DistortionPreset {
    /// Straight road.
    #[default]
    None,
    /// Rolling hills with lateral sway.
    Mountain,
    /// Sweeping curves in x and y.
    Xy,
    /// Long gentle bends.
    LongRace,
}

impl DistortionPreset {
    /// WGSL snippet spliced in at the distortion marker.
    #[must_use]
    pub fn snippet(self) -> &'static str {
        match self {
            Self::None => NONE_SNIPPET,
            Self::Mountain => MOUNTAIN_SNIPPET,
            Self::Xy => XY_SNIPPET,
            Self::LongRace => LONG_RACE_SNIPPET,
        }
    }

    /// `(frequency, amplitude)` uniform values for this preset.
    #[must_use]
    pub fn params(self) -> ([f32; 4], [f32; 4]) {
        match self {
            Self::None => ([0.0; 4], [0.0; 4]),
            Self::Mountain => ([3.0, 6.0, 10.0, 0.0], [30.0, 30.0, 20.0, 0.0]),
            Self::Xy => ([5.0, 2.0, 0.0, 0.0], [25.0, 15.0, 0.0, 0.0]),
            Self::LongRace => ([2.0, 3.0, 0.0, 0.0], [35.0, 10.0, 0.0, 0.0]),
        }
    }

    /// Every preset, for exhaustive shader checks.
    pub const ALL: [Self; 4] = [Self::None, Self::Mountain, Self::Xy, Self::LongRace];
}

const NONE_SNIPPET: &str = "\
fn get_distortion(progress: f32) -> vec3<f32> {
    return vec3<f32>(0.0);
}";

const MOUNTAIN_SNIPPET: &str = "\
fn nsin(v: f32) -> f32 {
    return sin(v) * 0.5 + 0.5;
}

fn get_distortion(progress: f32) -> vec3<f32> {
    let fix = 0.02;
    let f = uniforms.distortion_freq.xyz;
    let a = uniforms.distortion_amp.xyz;
    let t = uniforms.time;
    return vec3<f32>(
        cos(progress * PI * f.x + t) * a.x - cos(fix * PI * f.x + t) * a.x,
        nsin(progress * PI * f.y + t) * a.y - nsin(fix * PI * f.y + t) * a.y,
        nsin(progress * PI * f.z + t) * a.z - nsin(fix * PI * f.z + t) * a.z,
    );
}";

const XY_SNIPPET: &str = "\
fn get_distortion(progress: f32) -> vec3<f32> {
    let fix = 0.02;
    let f = uniforms.distortion_freq.xy;
    let a = uniforms.distortion_amp.xy;
    let t = uniforms.time;
    let half_pi = PI / 2.0;
    return vec3<f32>(
        cos(progress * PI * f.x + t) * a.x - cos(fix * PI * f.x + t) * a.x,
        sin(progress * PI * f.y + half_pi + t) * a.y
            - sin(fix * PI * f.y + half_pi + t) * a.y,
        0.0,
    );
}";

const LONG_RACE_SNIPPET: &str = "\
fn get_distortion(progress: f32) -> vec3<f32> {
    let cam = 0.0125;
    let f = uniforms.distortion_freq.xy;
    let a = uniforms.distortion_amp.xy;
    let t = uniforms.time;
    return vec3<f32>(
        sin(progress * PI * f.x + t) * a.x - sin(cam * PI * f.x + t) * a.x,
        sin(progress * PI * f.y + t) * a.y - sin(cam * PI * f.y + t) * a.y,
        0.0,
    );
}";
