use crate::utils::{Color, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

pub const PLOT_WIDTH_KEY: &str = "ideogram.plot-width";
pub const ROW_HEIGHT_KEY: &str = "ideogram.separation";
pub const GAIN_COLOR_KEY: &str = "ideogram.gains.color";
pub const LOSS_COLOR_KEY: &str = "ideogram.losses.color";

const DEFAULT_PLOT_WIDTH: u32 = 800;
const DEFAULT_ROW_HEIGHT: u32 = 6;
const MAX_DIMENSION: u32 = 10_000;
const DEFAULT_GAIN_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);
const DEFAULT_LOSS_COLOR: Color = Color::rgb(0x00, 0x00, 0xFF);

/// String key-value store for settings that outlive a single run.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: String);

    fn save(&self) -> Result<()>;

    fn plot_width(&self) -> Result<u32> {
        get_dimension(self, PLOT_WIDTH_KEY, DEFAULT_PLOT_WIDTH)
    }

    fn row_height(&self) -> Result<u32> {
        get_dimension(self, ROW_HEIGHT_KEY, DEFAULT_ROW_HEIGHT)
    }

    fn gain_color(&self) -> Result<Color> {
        get_parsed(self, GAIN_COLOR_KEY, DEFAULT_GAIN_COLOR)
    }

    fn loss_color(&self) -> Result<Color> {
        get_parsed(self, LOSS_COLOR_KEY, DEFAULT_LOSS_COLOR)
    }
}

fn get_parsed<S, T>(store: &S, key: &str, default: T) -> Result<T>
where
    S: SettingsStore + ?Sized,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match store.get(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| format!("Invalid value for setting {}: {}", key, e)),
        None => Ok(default),
    }
}

// Pixel sizes are limited to 1..=MAX_DIMENSION.
fn get_dimension<S: SettingsStore + ?Sized>(store: &S, key: &str, default: u32) -> Result<u32> {
    let value = get_parsed(store, key, default)?;
    if (1..=MAX_DIMENSION).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "Invalid value for setting {}: {} is outside 1..={}",
            key, value, MAX_DIMENSION
        ))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct SettingsValues(BTreeMap<String, String>);

/// Settings persisted as a flat JSON object.
#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: SettingsValues,
}

impl JsonSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
            serde_json::from_str(&json)
                .map_err(|e| format!("Corrupt settings file {}: {}", path.display(), e))?
        } else {
            log::debug!("No settings at {}, using defaults", path.display());
            SettingsValues::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.0.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.0.insert(key.to_string(), value);
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.values).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| format!("{}: {}", self.path.display(), e))?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
