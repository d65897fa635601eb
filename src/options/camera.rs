use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera placement and projection parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Eye height above the road.
    #[schemars(title = "Height", range(min = 0.5, max = 40.0), extend("step" = 0.5))]
    pub height: f32,
    /// Eye position along the road axis.
    #[schemars(skip)]
    pub z: f32,
    /// How far down the road the camera looks.
    #[schemars(title = "Look Ahead", range(min = 5.0, max = 400.0), extend("step" = 5.0))]
    pub look_ahead: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 90.0,
            height: 8.0,
            z: -5.0,
            look_ahead: 80.0,
            znear: 0.1,
            zfar: 10_000.0,
        }
    }
}
