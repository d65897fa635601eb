//! Centralized scene options with TOML preset support.
//!
//! Road layout, both light sets, fog and camera are consolidated here.
//! Options serialize to/from TOML for presets stored in `assets/presets/`.

mod camera;
mod fog;
mod lights;
mod road;

use std::path::Path;

pub use camera::CameraOptions;
pub use fog::FogOptions;
pub use lights::CarLightsOptions;
pub use road::RoadOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CarLightsError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[fog]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Road layout shared by both sets.
    pub road: RoadOptions,
    /// Traffic on the left roadway. Missing fields come from
    /// [`CarLightsOptions::moving_away`].
    #[serde(deserialize_with = "lights::deserialize_moving_away")]
    #[schemars(with = "CarLightsOptions")]
    pub left_lights: CarLightsOptions,
    /// Oncoming traffic on the right roadway. Missing fields come from
    /// [`CarLightsOptions::oncoming`].
    #[serde(deserialize_with = "lights::deserialize_oncoming")]
    #[schemars(with = "CarLightsOptions")]
    pub right_lights: CarLightsOptions,
    /// Distance fog and background color.
    pub fog: FogOptions,
    /// Camera placement.
    pub camera: CameraOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            road: RoadOptions::default(),
            left_lights: CarLightsOptions::moving_away(),
            right_lights: CarLightsOptions::oncoming(),
            fog: FogOptions::default(),
            camera: CameraOptions::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::Io`] if the file cannot be read and
    /// [`CarLightsError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, CarLightsError> {
        let content = std::fs::read_to_string(path)?;
        let options = toml::from_str(&content)
            .map_err(|e| CarLightsError::OptionsParse(e.to_string()))?;
        log::info!("Loaded options preset '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CarLightsError::OptionsParse`] on serialization failure and
    /// [`CarLightsError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CarLightsError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CarLightsError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved options preset '{}'", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::{
        DistortionPreset, LaneCentering, LightColors, LightInstanceConfig,
    };

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[right_lights]
count = 12
distortion = 'long_race'
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.right_lights.count, 12);
        assert_eq!(opts.right_lights.distortion, DistortionPreset::LongRace);
        // Everything else stays oncoming traffic.
        assert!(opts.right_lights.speed < 0.0);
        assert_eq!(opts.right_lights.centering, LaneCentering::Mirrored);
        assert_eq!(
            opts.right_lights.colors,
            CarLightsOptions::oncoming().colors
        );
        assert_eq!(opts.road, RoadOptions::default());
        assert_eq!(opts.left_lights, CarLightsOptions::moving_away());
    }

    #[test]
    fn partial_left_table_keeps_moving_away_defaults() {
        let toml_str = r"
[left_lights]
colors = [1.0, 1.0, 1.0]
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.left_lights.colors, LightColors::Single([1.0; 3]));
        assert!(opts.left_lights.speed > 0.0);
        assert_eq!(opts.left_lights.centering, LaneCentering::Standard);
        assert_eq!(opts.right_lights, CarLightsOptions::oncoming());
    }

    #[test]
    fn light_defaults_agree_with_road_defaults() {
        let road = RoadOptions::default();
        let config = CarLightsOptions::default().instance_config(&road);
        assert_eq!(config, LightInstanceConfig::default());
    }

    #[test]
    fn default_sets_travel_in_opposite_directions() {
        let opts = Options::default();
        assert!(opts.left_lights.speed > 0.0);
        assert!(opts.right_lights.speed < 0.0);
    }

    #[test]
    fn instance_config_carries_road_layout() {
        let opts = Options::default();
        let config = opts.left_lights.instance_config(&opts.road);
        assert_eq!(config.road_width, 9.0);
        assert_eq!(config.road_sections, 3);
        assert_eq!(config.road_depth, 400.0);
        assert_eq!(config.instance_count(), 80);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("car-lights-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.left_lights.seed = Some(99);
        opts.save(&dir.join("night.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["night".to_owned()]);
        let loaded = Options::load(&dir.join("night.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = std::env::temp_dir()
            .join(format!("car-lights-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[road]\nwidth = 'wide'\n").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(CarLightsError::OptionsParse(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bundled_presets_load() {
        let dir =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets");
        let names = Options::list_presets(&dir);
        assert_eq!(names, vec!["long_race".to_owned(), "mountain".to_owned()]);

        let race = Options::load(&dir.join("long_race.toml")).unwrap();
        assert_eq!(race.left_lights.distortion, DistortionPreset::LongRace);
        assert!(race.right_lights.speed < 0.0);

        let mountain = Options::load(&dir.join("mountain.toml")).unwrap();
        assert_eq!(mountain.road.sections, 4);
        assert_eq!(mountain.left_lights.seed, Some(7));
        assert_eq!(mountain.road.width, RoadOptions::default().width);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("road"));
        assert!(props.contains_key("left_lights"));
        assert!(props.contains_key("right_lights"));
        assert!(props.contains_key("fog"));
        assert!(props.contains_key("camera"));

        let lights = &props["left_lights"]["properties"];
        assert!(lights.get("count").is_some());
        assert!(lights.get("distortion").is_some());
        assert!(lights.get("seed").is_none());
        assert!(lights.get("colors").is_none());
    }
}
