use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Road", inline)]
#[serde(default)]
/// Road layout shared by both light sets.
pub struct RoadOptions {
    /// Width of one roadway (one direction of travel).
    #[schemars(title = "Roadway Width", range(min = 1.0, max = 40.0), extend("step" = 0.5))]
    pub width: f32,
    /// Lanes per roadway.
    #[schemars(title = "Lanes", range(min = 1, max = 8))]
    pub sections: u32,
    /// Visible road length; streaks wrap after travelling this far.
    #[schemars(title = "Length", range(min = 50.0, max = 2000.0), extend("step" = 10.0))]
    pub depth: f32,
    /// Gap between the two roadways.
    #[schemars(title = "Island Width", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub island_width: f32,
}

impl Default for RoadOptions {
    fn default() -> Self {
        Self {
            width: 9.0,
            sections: 3,
            depth: 400.0,
            island_width: 2.0,
        }
    }
}

impl RoadOptions {
    /// X offset from the road center to the middle of one roadway.
    #[must_use]
    pub fn roadway_center(&self) -> f32 {
        self.width / 2.0 + self.island_width / 2.0
    }
}
