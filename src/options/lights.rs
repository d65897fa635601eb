use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::road::RoadOptions;
use crate::lights::{
    DistortionPreset, LaneCentering, LaneMode, LightColors,
    LightInstanceConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Car Lights", inline)]
#[serde(default)]
/// One direction of traffic.
pub struct CarLightsOptions {
    /// Number of cars (each drawn as two lights).
    #[schemars(title = "Cars", range(min = 0, max = 2000))]
    pub count: usize,
    /// Single color or palette picked per car.
    #[schemars(skip)]
    pub colors: LightColors,
    /// Streak speed in world units per second; negative comes toward the
    /// camera.
    #[schemars(title = "Speed")]
    pub speed: f32,
    /// How much the tail of each streak dims, 0..1.
    #[schemars(title = "Tail Fade", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub fade: f32,
    /// Vertex distortion applied along the road.
    pub distortion: DistortionPreset,
    /// Lane center sign convention.
    #[schemars(skip)]
    pub centering: LaneCentering,
    /// Car index to lane mapping.
    #[schemars(skip)]
    pub lane_mode: LaneMode,
    /// Fixed random seed for reproducible layouts; `None` draws from
    /// entropy.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for CarLightsOptions {
    fn default() -> Self {
        Self {
            count: 40,
            colors: LightColors::default(),
            speed: 60.0,
            fade: 0.6,
            distortion: DistortionPreset::None,
            centering: LaneCentering::Standard,
            lane_mode: LaneMode::FixedThree,
            seed: None,
        }
    }
}

impl CarLightsOptions {
    /// Traffic moving away from the camera on the left roadway.
    #[must_use]
    pub fn moving_away() -> Self {
        Self {
            colors: LightColors::from_hex(&[0xd856bf, 0x6750a2, 0xc247ac]),
            speed: 60.0,
            ..Default::default()
        }
    }

    /// Oncoming traffic on the right roadway.
    #[must_use]
    pub fn oncoming() -> Self {
        Self {
            colors: LightColors::from_hex(&[0x03b3c3, 0x0e5ea5, 0x324555]),
            speed: -120.0,
            centering: LaneCentering::Mirrored,
            ..Default::default()
        }
    }

    /// Generator input for this set on `road`.
    #[must_use]
    pub fn instance_config(&self, road: &RoadOptions) -> LightInstanceConfig {
        LightInstanceConfig {
            colors: self.colors.clone(),
            count: self.count,
            road_width: road.width,
            road_sections: road.sections,
            road_depth: road.depth,
            speed: self.speed,
            centering: self.centering,
            lane_mode: self.lane_mode,
        }
    }
}

/// Fields present in one `[left_lights]`/`[right_lights]` table. Absent
/// fields keep the value of that side's preset.
#[derive(Deserialize)]
struct CarLightsOverrides {
    count: Option<usize>,
    colors: Option<LightColors>,
    speed: Option<f32>,
    fade: Option<f32>,
    distortion: Option<DistortionPreset>,
    centering: Option<LaneCentering>,
    lane_mode: Option<LaneMode>,
    seed: Option<u64>,
}

impl CarLightsOverrides {
    fn apply(self, base: CarLightsOptions) -> CarLightsOptions {
        CarLightsOptions {
            count: self.count.unwrap_or(base.count),
            colors: self.colors.unwrap_or(base.colors),
            speed: self.speed.unwrap_or(base.speed),
            fade: self.fade.unwrap_or(base.fade),
            distortion: self.distortion.unwrap_or(base.distortion),
            centering: self.centering.unwrap_or(base.centering),
            lane_mode: self.lane_mode.unwrap_or(base.lane_mode),
            seed: self.seed.or(base.seed),
        }
    }
}

/// Deserialize a partial table over [`CarLightsOptions::moving_away`].
pub(super) fn deserialize_moving_away<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CarLightsOptions, D::Error> {
    Ok(CarLightsOverrides::deserialize(deserializer)?
        .apply(CarLightsOptions::moving_away()))
}

/// Deserialize a partial table over [`CarLightsOptions::oncoming`].
pub(super) fn deserialize_oncoming<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CarLightsOptions, D::Error> {
    Ok(CarLightsOverrides::deserialize(deserializer)?
        .apply(CarLightsOptions::oncoming()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_keeps_side_preset() {
        let left: CarLightsOptions =
            deserialize_moving_away(toml::de::ValueDeserializer::new("{}"))
                .unwrap();
        assert_eq!(left, CarLightsOptions::moving_away());
    }

    #[test]
    fn overrides_replace_only_named_fields() {
        let right = deserialize_oncoming(toml::de::ValueDeserializer::new(
            "{ count = 12, seed = 3 }",
        ))
        .unwrap();
        assert_eq!(right.count, 12);
        assert_eq!(right.seed, Some(3));
        assert_eq!(right.speed, CarLightsOptions::oncoming().speed);
        assert_eq!(right.centering, LaneCentering::Mirrored);
        assert_eq!(right.colors, CarLightsOptions::oncoming().colors);
    }
}
