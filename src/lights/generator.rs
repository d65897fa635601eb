use rand::Rng;

use super::config::LightInstanceConfig;

/// Floats per instance in [`InstanceAttributes::offsets`].
pub const OFFSET_COMPONENTS: usize = 3;
/// Floats per instance in [`InstanceAttributes::metrics`].
pub const METRICS_COMPONENTS: usize = 2;
/// Floats per instance in [`InstanceAttributes::colors`].
pub const COLOR_COMPONENTS: usize = 3;

/// Smallest light radius.
pub const MIN_RADIUS: f32 = 0.1;
/// Spread added on top of [`MIN_RADIUS`].
pub const RADIUS_SPREAD: f32 = 0.1;
/// Shortest streak, as a fraction of road depth.
pub const MIN_LENGTH_FRACTION: f32 = 0.02;
/// Spread added on top of [`MIN_LENGTH_FRACTION`].
pub const LENGTH_SPREAD_FRACTION: f32 = 0.08;
/// Maximum outward jitter of each light from the car edge.
pub const MAX_OFFSET_X: f32 = 0.5;
/// Light height above the road, in multiples of its radius.
pub const HEIGHT_PER_RADIUS: f32 = 1.3;

/// Flat per-instance attribute arrays, ready to upload as instance-step
/// vertex buffers.
///
/// Instances come in pairs: index `2i` is the left light of car `i`, `2i+1`
/// the right one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceAttributes {
    /// `(x, y, z)` per instance.
    pub offsets: Vec<f32>,
    /// `(radius, length)` per instance.
    pub metrics: Vec<f32>,
    /// `(r, g, b)` per instance.
    pub colors: Vec<f32>,
}

impl InstanceAttributes {
    fn with_cars(cars: usize) -> Self {
        let instances = cars * 2;
        Self {
            offsets: Vec::with_capacity(instances * OFFSET_COMPONENTS),
            metrics: Vec::with_capacity(instances * METRICS_COMPONENTS),
            colors: Vec::with_capacity(instances * COLOR_COMPONENTS),
        }
    }

    /// Number of light instances (two per car).
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.metrics.len() / METRICS_COMPONENTS
    }

    /// `true` when no instances were generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Offset of instance `i`, or `None` past the last instance.
    #[must_use]
    pub fn offset(&self, i: usize) -> Option<[f32; 3]> {
        component(&self.offsets, i)
    }

    /// `(radius, length)` of instance `i`, or `None` past the last instance.
    #[must_use]
    pub fn metric(&self, i: usize) -> Option<[f32; 2]> {
        component(&self.metrics, i)
    }

    /// Color of instance `i`, or `None` past the last instance.
    #[must_use]
    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        component(&self.colors, i)
    }
}

fn component<const N: usize>(data: &[f32], i: usize) -> Option<[f32; N]> {
    let start = i.checked_mul(N)?;
    data.get(start..start.checked_add(N)?)?.try_into().ok()
}

/// Generate offsets, metrics and colors for every car in `config`.
///
/// Per car, randomness is drawn in a fixed order (radius, length, x jitter,
/// depth, color) so a seeded `rng` always reproduces the same layout.
pub fn generate_attributes<R: Rng + ?Sized>(
    config: &LightInstanceConfig,
    rng: &mut R,
) -> InstanceAttributes {
    let mut attrs = InstanceAttributes::with_cars(config.count);
    let half_car = config.car_width() / 2.0;
    let depth = config.road_depth;

    for i in 0..config.count {
        let section_x = config.lane_center(config.lane_bucket(i));

        let radius = rng.random::<f32>() * RADIUS_SPREAD + MIN_RADIUS;
        let length = rng.random::<f32>() * depth * LENGTH_SPREAD_FRACTION
            + depth * MIN_LENGTH_FRACTION;

        let offset_x = rng.random::<f32>() * MAX_OFFSET_X;
        let offset_y = radius * HEIGHT_PER_RADIUS;
        let offset_z = rng.random::<f32>() * depth;

        attrs.offsets.extend_from_slice(&[
            section_x - half_car - offset_x,
            offset_y,
            -offset_z,
            section_x + half_car + offset_x,
            offset_y,
            -offset_z,
        ]);
        attrs
            .metrics
            .extend_from_slice(&[radius, length, radius, length]);

        let color = config.colors.pick(rng);
        attrs.colors.extend_from_slice(&color);
        attrs.colors.extend_from_slice(&color);
    }

    log::debug!(
        "generated {} light instances ({} cars, section width {:.3})",
        attrs.instance_count(),
        config.count,
        config.section_width()
    );
    attrs
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::lights::config::{LaneCentering, LaneMode, LightColors};

    fn example_config() -> LightInstanceConfig {
        LightInstanceConfig {
            count: 3,
            road_width: 12.0,
            road_sections: 3,
            road_depth: 200.0,
            ..Default::default()
        }
    }

    /// Midpoint between the two lights of `car`.
    fn car_center(attrs: &InstanceAttributes, car: usize) -> f32 {
        let [left, ..] = attrs.offset(2 * car).unwrap();
        let [right, ..] = attrs.offset(2 * car + 1).unwrap();
        (left + right) / 2.0
    }

    #[test]
    fn array_lengths_scale_with_count() {
        let mut rng = StdRng::seed_from_u64(0);
        for n in [0, 1, 2, 7, 64] {
            let config = LightInstanceConfig {
                count: n,
                ..Default::default()
            };
            let attrs = generate_attributes(&config, &mut rng);
            assert_eq!(attrs.offsets.len(), 6 * n);
            assert_eq!(attrs.metrics.len(), 4 * n);
            assert_eq!(attrs.colors.len(), 6 * n);
            assert_eq!(attrs.instance_count(), 2 * n);
        }
    }

    #[test]
    fn zero_cars_is_empty() {
        let config = LightInstanceConfig {
            count: 0,
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(3));
        assert!(attrs.is_empty());
    }

    #[test]
    fn metrics_stay_in_range() {
        let config = LightInstanceConfig {
            count: 500,
            road_depth: 250.0,
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(11));
        for i in 0..attrs.instance_count() {
            let [radius, length] = attrs.metric(i).unwrap();
            assert!((0.1..=0.2).contains(&radius), "radius {radius}");
            assert!((5.0..=25.0).contains(&length), "length {length}");
        }
    }

    #[test]
    fn paired_lights_share_height_and_depth() {
        let config = example_config();
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(5));
        for car in 0..config.count {
            let left = attrs.offset(2 * car).unwrap();
            let right = attrs.offset(2 * car + 1).unwrap();
            assert_eq!(left[1], right[1]);
            assert_eq!(left[2], right[2]);
            assert!(right[0] > left[0]);

            // Gap is car width plus twice the jitter, jitter in [0, 0.5).
            let gap = right[0] - left[0];
            let jitter = (gap - config.car_width()) / 2.0;
            assert!((-1e-5..0.5 + 1e-5).contains(&jitter), "jitter {jitter}");
        }
    }

    #[test]
    fn height_follows_radius_and_depth_is_behind_origin() {
        let config = example_config();
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(9));
        for i in 0..attrs.instance_count() {
            let [_, y, z] = attrs.offset(i).unwrap();
            let [radius, _] = attrs.metric(i).unwrap();
            assert!((y - radius * 1.3).abs() < 1e-6);
            assert!((-200.0..=0.0).contains(&z));
        }
    }

    #[test]
    fn paired_lights_share_metrics_and_color() {
        let config = LightInstanceConfig {
            count: 20,
            colors: LightColors::from_hex(&[0xd856bf, 0x6750a2, 0xc247ac]),
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(2));
        for car in 0..config.count {
            assert_eq!(attrs.metric(2 * car), attrs.metric(2 * car + 1));
            assert_eq!(attrs.color(2 * car), attrs.color(2 * car + 1));
        }
    }

    #[test]
    fn worked_example_lane_zero() {
        let config = example_config();
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(42));
        assert_eq!(config.section_width(), 4.0);
        assert_eq!(attrs.offsets.len(), 18);
        assert_eq!(attrs.metrics.len(), 12);

        let centers: Vec<f32> =
            (0..3).map(|car| car_center(&attrs, car)).collect();
        assert!((centers[0] + 4.0).abs() < 1e-5);
        assert!(centers[1].abs() < 1e-5);
        assert!((centers[2] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn lane_buckets_wrap_at_three_with_more_sections() {
        let config = LightInstanceConfig {
            count: 8,
            road_width: 20.0,
            road_sections: 5,
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(4));
        // Section width 4: buckets 0, 1, 2 sit at -8, -4, 0.
        for car in 0..config.count {
            let expected = config.lane_center((car % 3) as u32);
            assert!((car_center(&attrs, car) - expected).abs() < 1e-5);
        }
        assert!((car_center(&attrs, 3) + 8.0).abs() < 1e-5);
    }

    #[test]
    fn sections_mode_reaches_every_lane() {
        let config = LightInstanceConfig {
            count: 5,
            road_width: 20.0,
            road_sections: 5,
            lane_mode: LaneMode::Sections,
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(4));
        assert!((car_center(&attrs, 4) - 8.0).abs() < 1e-5);
    }

    #[test]
    fn mirrored_centering_flips_lanes() {
        let config = LightInstanceConfig {
            centering: LaneCentering::Mirrored,
            ..example_config()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(42));
        assert!((car_center(&attrs, 0) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let config = LightInstanceConfig {
            count: 32,
            colors: LightColors::from_hex(&[0x03b3c3, 0x0e5ea5, 0x324555]),
            ..Default::default()
        };
        let a = generate_attributes(&config, &mut StdRng::seed_from_u64(77));
        let b = generate_attributes(&config, &mut StdRng::seed_from_u64(77));
        let c = generate_attributes(&config, &mut StdRng::seed_from_u64(78));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn accessors_stop_at_last_instance() {
        let config = LightInstanceConfig {
            count: 2,
            ..Default::default()
        };
        let attrs = generate_attributes(&config, &mut StdRng::seed_from_u64(6));
        assert_eq!(attrs.instance_count(), 4);
        assert!(attrs.offset(3).is_some());
        assert!(attrs.offset(4).is_none());
        assert!(attrs.metric(4).is_none());
        assert!(attrs.color(usize::MAX).is_none());
    }
}
