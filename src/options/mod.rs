//! Centralized configuration with TOML file support.
//!
//! All tweakable settings (window, camera, lighting, line trails, asset
//! paths, keybindings) are consolidated here. Options serialize to/from
//! TOML; every section is optional in the file.

mod assets;
mod camera;
mod keybindings;
mod lighting;
mod trails;
mod window;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::{LightingOptions, ShadingModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use trails::TrailOptions;
pub use window::WindowOptions;

use crate::error::GlearnError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window size and frame pacing.
    pub window: WindowOptions,
    /// Fly camera parameters.
    pub camera: CameraOptions,
    /// Light and material parameters.
    pub lighting: LightingOptions,
    /// Line-trail effect parameters.
    pub trails: TrailOptions,
    /// Shader and texture locations.
    #[schemars(skip)]
    pub assets: AssetOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Pretty-printed JSON Schema, ready to write to disk.
    pub fn json_schema_string() -> Result<String, GlearnError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| GlearnError::OptionsParse(e.to_string()))
    }

    /// Parse options from TOML text. Missing fields use defaults; a
    /// `trails.line_count` of zero is raised to one.
    pub fn from_toml(content: &str) -> Result<Self, GlearnError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| GlearnError::OptionsParse(e.to_string()))?;
        options.trails.clamp_line_count();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GlearnError> {
        let content = std::fs::read_to_string(path).map_err(GlearnError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GlearnError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlearnError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlearnError::Io)?;
        }
        std::fs::write(path, content).map_err(GlearnError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
move_speed = 2.5

[lighting]
shading = "gouraud"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.move_speed, 2.5);
        assert_eq!(opts.lighting.shading, ShadingModel::Gouraud);
        // Everything else should be default
        assert_eq!(opts.camera.fov, 45.0);
        assert_eq!(opts.camera.position, [0.0, 0.0, 3.0]);
        assert_eq!(opts.trails.line_count, 10);
        assert_eq!(opts.window.width, 800);
    }

    #[test]
    fn zero_line_count_is_raised_to_one() {
        let opts = Options::from_toml("[trails]\nline_count = 0\n").unwrap();
        assert_eq!(opts.trails.line_count, 1);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nfov = ").unwrap_err();
        assert!(matches!(err, GlearnError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!(
            "glearn-options-{}",
            std::process::id()
        ));
        let path = dir.join("nested").join("options.toml");
        let mut opts = Options::default();
        opts.trails.seed = Some(7);
        opts.camera.clamp_pitch = false;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyW"),
            Some(KeyAction::MoveForward)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Exit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebinding_replaces_key() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind("KeyW", KeyAction::MoveUp);
        assert_eq!(bindings.lookup("KeyW"), Some(KeyAction::MoveUp));
    }

    #[test]
    fn shading_toggles() {
        assert_eq!(ShadingModel::Phong.toggled(), ShadingModel::Gouraud);
        assert_eq!(ShadingModel::Gouraud.toggled(), ShadingModel::Phong);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("window"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("trails"));

        // Skipped sections should be absent
        assert!(!props.contains_key("assets"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fov").is_some());
        assert!(camera.get("move_speed").is_some());
        assert!(camera.get("position").is_none());
    }
}
