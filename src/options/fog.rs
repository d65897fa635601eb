use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Fog", inline)]
#[serde(default)]
/// Distance fog. The color doubles as the clear color.
pub struct FogOptions {
    /// Fog and background RGB color.
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Distance where fog starts.
    #[schemars(title = "Fog Near", range(min = 0.0, max = 1000.0), extend("step" = 5.0))]
    pub near: f32,
    /// Distance where streaks are fully hidden.
    #[schemars(title = "Fog Far", range(min = 1.0, max = 5000.0), extend("step" = 5.0))]
    pub far: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            near: 80.0,
            far: 420.0,
        }
    }
}
