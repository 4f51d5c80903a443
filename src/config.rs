use crate::settings::Settings;
use eyre::Result;
use serde_json::{Map, Value};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    filepath: PathBuf,
}

impl Config {
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join("configuration.json");

        if filepath.exists() {
            return Self::load_from(filepath);
        }

        // Save initial config if it doesn't exist
        let config = Self {
            settings: Settings::default(),
            filepath,
        };
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_json = serde_json::json!({
            "Setting": self.settings,
        });
        let config_str = serde_json::to_string_pretty(&config_json)?;

        if let Some(parent) = self.filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        Ok(())
    }

    /// Load configuration from a custom path. Keys that are missing or of
    /// the wrong type keep their defaults; a file that is not JSON at all
    /// yields the default settings.
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            match serde_json::from_str::<Value>(&config_str) {
                Ok(user_config) => {
                    if let Some(user_settings_map) =
                        user_config.get("Setting").and_then(|v| v.as_object())
                    {
                        apply_settings(&mut settings, user_settings_map);
                    }
                }
                Err(err) => {
                    log::warn!(
                        "ignoring unreadable configuration {}: {err}",
                        filepath.display()
                    );
                }
            }
        }

        Ok(Self { settings, filepath })
    }
}

fn apply_settings(settings: &mut Settings, map: &Map<String, Value>) {
    let flag = |key: &str| map.get(key).and_then(|v| v.as_bool());
    let pixels = |key: &str| map.get(key).and_then(|v| v.as_f64()).map(|v| v as f32);

    if let Some(val) = flag("text_selectable") {
        settings.text_selectable = val;
    }
    if let Some(val) = flag("continuous_scroll") {
        settings.continuous_scroll = val;
    }
    if let Some(val) = flag("selecting_search_result") {
        settings.selecting_search_result = val;
    }
    if let Some(val) = pixels("header_height") {
        settings.header_height = val;
    }
    if let Some(val) = pixels("viewport_width") {
        settings.viewport_width = val;
    }
    if let Some(val) = pixels("viewport_height") {
        settings.viewport_height = val;
    }
    if let Some(val) = pixels("padding_left") {
        settings.padding_left = val;
    }
    if let Some(val) = pixels("padding_top") {
        settings.padding_top = val;
    }
    if let Some(val) = pixels("padding_right") {
        settings.padding_right = val;
    }
    if let Some(val) = pixels("padding_bottom") {
        settings.padding_bottom = val;
    }
}

pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(config_home).join("folio");
        return Ok(path);
    } else if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home.clone()).join(".config").join("folio");
        if path.exists() {
            return Ok(path);
        } else {
            return Ok(PathBuf::from(home).join(".folio"));
        }
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(user_profile).join(".folio"));
    }

    Err(eyre::eyre!(
        "Could not determine application data directory"
    ))
}
