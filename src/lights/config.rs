use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of lane buckets cars are spread over in [`LaneMode::FixedThree`].
pub const FIXED_LANE_BUCKETS: u32 = 3;

/// Fallback when a palette is configured empty.
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Colors a light set draws from.
///
/// A single color paints every car the same. A palette picks one entry per
/// car, uniformly at random; both lights of the car share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LightColors {
    /// One RGB color for every car.
    Single([f32; 3]),
    /// Candidate RGB colors, one picked per car.
    Palette(Vec<[f32; 3]>),
}

impl LightColors {
    /// Build a palette from `0xRRGGBB` values.
    #[must_use]
    pub fn from_hex(values: &[u32]) -> Self {
        Self::Palette(values.iter().map(|&v| hex_to_rgb(v)).collect())
    }

    /// Pick the color for one car.
    ///
    /// Consumes randomness only when there is more than one candidate.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 3] {
        match self {
            Self::Single(color) => *color,
            Self::Palette(colors) => match colors.len() {
                0 => WHITE,
                1 => colors[0],
                n => colors[rng.random_range(0..n)],
            },
        }
    }
}

impl Default for LightColors {
    fn default() -> Self {
        Self::Single(WHITE)
    }
}

/// Convert `0xRRGGBB` to linear-ish `[0, 1]` RGB components.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Sign convention for lane centers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LaneCentering {
    /// Lane 0 sits on the negative-x edge of the road.
    #[default]
    Standard,
    /// Lane 0 sits on the positive-x edge (sign-flipped centers).
    Mirrored,
}

/// How car indices map onto lane buckets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LaneMode {
    /// `i mod 3`, whatever the configured section count. Lane centers only
    /// line up with the road sections when there are exactly three.
    #[default]
    FixedThree,
    /// `i mod road_sections`, so every configured section gets cars.
    Sections,
}

/// Input for one set of instanced car lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightInstanceConfig {
    /// Color or palette the cars are painted from.
    pub colors: LightColors,
    /// Number of cars. Each car is two light instances.
    pub count: usize,
    /// Full road width in world units.
    pub road_width: f32,
    /// Number of lane sections the width is split into.
    pub road_sections: u32,
    /// Visible road length; also the travel length of a streak.
    pub road_depth: f32,
    /// Streak speed in world units per second. Negative runs toward +z.
    pub speed: f32,
    /// Lane center sign convention.
    pub centering: LaneCentering,
    /// Car index to lane bucket mapping.
    pub lane_mode: LaneMode,
}

impl Default for LightInstanceConfig {
    fn default() -> Self {
        Self {
            colors: LightColors::default(),
            count: 40,
            road_width: 9.0,
            road_sections: 3,
            road_depth: 400.0,
            speed: 60.0,
            centering: LaneCentering::Standard,
            lane_mode: LaneMode::FixedThree,
        }
    }
}

impl LightInstanceConfig {
    /// Width of one lane section.
    #[must_use]
    pub fn section_width(&self) -> f32 {
        self.road_width / self.road_sections as f32
    }

    /// Lane bucket for car `i`.
    #[must_use]
    pub fn lane_bucket(&self, i: usize) -> u32 {
        let buckets = match self.lane_mode {
            LaneMode::FixedThree => FIXED_LANE_BUCKETS,
            LaneMode::Sections => self.road_sections.max(1),
        };
        (i % buckets as usize) as u32
    }

    /// Horizontal center of lane bucket `section`.
    #[must_use]
    pub fn lane_center(&self, section: u32) -> f32 {
        let width = self.section_width();
        let x =
            section as f32 * width - self.road_width / 2.0 + width / 2.0;
        match self.centering {
            LaneCentering::Standard => x,
            LaneCentering::Mirrored => -x,
        }
    }

    /// Distance between the inner edges of a car's two lights, before
    /// jitter.
    #[must_use]
    pub fn car_width(&self) -> f32 {
        0.5 * self.section_width()
    }

    /// Number of light instances drawn for this set (two per car).
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.count * 2
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn lane_centers_span_road() {
        let config = LightInstanceConfig {
            road_width: 12.0,
            road_sections: 3,
            ..Default::default()
        };
        assert_eq!(config.section_width(), 4.0);
        assert_eq!(config.lane_center(0), -4.0);
        assert_eq!(config.lane_center(1), 0.0);
        assert_eq!(config.lane_center(2), 4.0);
    }

    #[test]
    fn mirrored_centering_flips_sign() {
        let config = LightInstanceConfig {
            road_width: 12.0,
            road_sections: 3,
            centering: LaneCentering::Mirrored,
            ..Default::default()
        };
        assert_eq!(config.lane_center(0), 4.0);
        assert_eq!(config.lane_center(2), -4.0);
    }

    #[test]
    fn fixed_lane_mode_ignores_section_count() {
        let config = LightInstanceConfig {
            road_sections: 5,
            ..Default::default()
        };
        let buckets: Vec<u32> = (0..7).map(|i| config.lane_bucket(i)).collect();
        assert_eq!(buckets, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn sections_lane_mode_uses_section_count() {
        let config = LightInstanceConfig {
            road_sections: 4,
            lane_mode: LaneMode::Sections,
            ..Default::default()
        };
        let buckets: Vec<u32> = (0..6).map(|i| config.lane_bucket(i)).collect();
        assert_eq!(buckets, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn hex_colors_convert() {
        assert_eq!(hex_to_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        let [r, g, b] = hex_to_rgb(0x336699);
        assert!((r - 0.2).abs() < 1e-6);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn palette_picks_members() {
        let palette = LightColors::from_hex(&[0xff0000, 0x0000ff]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let c = palette.pick(&mut rng);
            assert!(c == [1.0, 0.0, 0.0] || c == [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(LightColors::Palette(vec![]).pick(&mut rng), WHITE);
    }

    #[test]
    fn colors_deserialize_single_or_palette() {
        #[derive(Deserialize)]
        struct Wrapper {
            colors: LightColors,
        }
        let single: Wrapper = toml::from_str("colors = [1.0, 0.5, 0.0]").unwrap();
        assert_eq!(single.colors, LightColors::Single([1.0, 0.5, 0.0]));
        let palette: Wrapper =
            toml::from_str("colors = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]")
                .unwrap();
        assert_eq!(
            palette.colors,
            LightColors::Palette(vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
        );
    }
}
