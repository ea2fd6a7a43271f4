//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (galaxy shape, camera, debug toggles) are
//! consolidated here. Options serialize to/from TOML so a tuned parameter
//! set can be saved and passed back in on the command line.

mod camera;
mod debug;
mod galaxy;

use std::path::Path;

pub use camera::CameraOptions;
pub use debug::DebugOptions;
pub use galaxy::{GalaxyOptions, MAX_POINT_COUNT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::WhorlError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[galaxy]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Field-shaping parameters; changes regenerate the point field.
    pub galaxy: GalaxyOptions,
    /// Camera projection and orbit-control parameters.
    pub camera: CameraOptions,
    /// Debug visualization options.
    pub debug: DebugOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Return a copy with every field clamped into its valid range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut opts = self.clone();
        opts.galaxy.sanitize();
        opts
    }

    /// Load options from a TOML file. Missing fields use defaults;
    /// out-of-range values are clamped.
    pub fn load(path: &Path) -> Result<Self, WhorlError> {
        let content = std::fs::read_to_string(path).map_err(WhorlError::Io)?;
        let opts: Self = toml::from_str(&content)
            .map_err(|e| WhorlError::OptionsParse(e.to_string()))?;
        Ok(opts.sanitized())
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), WhorlError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WhorlError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(WhorlError::Io)?;
        }
        std::fs::write(path, content).map_err(WhorlError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
[galaxy]
branches = 5
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.galaxy.branches, 5);
        // Everything else should be default
        assert_eq!(opts.galaxy.radius, 8.0);
        assert_eq!(opts.camera.fovy, 75.0);
        assert!(opts.debug.show_stats);
    }

    #[test]
    fn sanitized_clamps_galaxy_section() {
        let toml_str = r"
[galaxy]
branches = 0
radius = -2.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        let opts = opts.sanitized();
        assert_eq!(opts.galaxy.branches, 1);
        assert_eq!(opts.galaxy.radius, 0.0);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("galaxy"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("debug"));

        // Galaxy should expose the tunable fields with their ranges
        let galaxy = &props["galaxy"]["properties"];
        assert_eq!(galaxy["count"]["maximum"], 50_000);
        assert_eq!(galaxy["branches"]["minimum"], 1);
        assert!(galaxy.get("spin").is_some());

        // Clipping planes are not UI-exposed
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("znear").is_none());
        assert!(camera.get("zfar").is_none());
    }
}
