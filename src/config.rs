//! Configuration store and application paths.
//!
//! Values live in a flat TOML table keyed by `section/name`. Known keys have
//! a [`PrefDefinition`] giving their default and bounds; unknown keys are
//! kept and written back untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrefsError, Result};

/// Keys of the values this dialog reads and writes.
pub mod keys {
    pub const GUI_LANGUAGE: &str = "ui_last/gui_language";
    pub const THEME: &str = "ui_last/theme";
    pub const PERFORMANCE: &str = "ui/performance";
    pub const USE_SYSTEM_FONT: &str = "use_system_font";
    pub const FONT_SIZE: &str = "font_size";
    pub const SCREEN_DPI_OVERWRITE: &str = "screen_dpi_overwrite";
    pub const USER_CSS: &str = "themes/usercss";
    pub const DIALOG_WIDTH: &str = "ui_last/preferences_dialog_width";
    pub const DIALOG_HEIGHT: &str = "ui_last/preferences_dialog_height";
    pub const IMPORT_PATH: &str = "ui_last/import_path";
    pub const EXPORT_PATH: &str = "ui_last/export_path";
}

/// Font size used when the stored one is out of the sane range.
pub const FALLBACK_FONT_SIZE: f64 = 12.0;
/// Smallest DPI override accepted; -1 follows the system.
pub const MIN_DPI: i64 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ConfValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            ConfValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            ConfValue::Int(i) => Some(*i),
            ConfValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            ConfValue::Float(f) => Some(*f),
            ConfValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            ConfValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefDefault {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
}

impl PrefDefault {
    fn to_value(self) -> ConfValue {
        match self {
            PrefDefault::Bool(b) => ConfValue::Bool(b),
            PrefDefault::Int(i) => ConfValue::Int(i),
            PrefDefault::Float(f) => ConfValue::Float(f),
            PrefDefault::Str(s) => ConfValue::Str(s.to_string()),
        }
    }

    /// Text shown in "reset to" hints.
    pub fn display(&self) -> String {
        match self {
            PrefDefault::Bool(true) => "TRUE".to_string(),
            PrefDefault::Bool(false) => "FALSE".to_string(),
            PrefDefault::Int(i) => i.to_string(),
            PrefDefault::Float(f) => format!("{f:.1}"),
            PrefDefault::Str(s) => s.to_string(),
        }
    }
}

/// A known preference: default and optional numeric bounds.
#[derive(Debug, Clone, Copy)]
pub struct PrefDefinition {
    pub key: &'static str,
    pub default: PrefDefault,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

const fn pref(key: &'static str, default: PrefDefault) -> PrefDefinition {
    PrefDefinition {
        key,
        default,
        min: None,
        max: None,
    }
}

const fn bounded(key: &'static str, default: PrefDefault, min: f64, max: f64) -> PrefDefinition {
    PrefDefinition {
        key,
        default,
        min: Some(min),
        max: Some(max),
    }
}

pub const DEFINITIONS: &[PrefDefinition] = &[
    pref(keys::GUI_LANGUAGE, PrefDefault::Str("")),
    pref(keys::THEME, PrefDefault::Str("lumen")),
    pref(keys::PERFORMANCE, PrefDefault::Bool(false)),
    pref(keys::USE_SYSTEM_FONT, PrefDefault::Bool(true)),
    bounded(keys::FONT_SIZE, PrefDefault::Float(FALLBACK_FONT_SIZE), 5.0, 30.0),
    bounded(keys::SCREEN_DPI_OVERWRITE, PrefDefault::Int(-1), -1.0, 360.0),
    pref(keys::USER_CSS, PrefDefault::Bool(false)),
    bounded(keys::DIALOG_WIDTH, PrefDefault::Int(1100), 400.0, 8192.0),
    bounded(keys::DIALOG_HEIGHT, PrefDefault::Int(700), 300.0, 8192.0),
    pref(keys::IMPORT_PATH, PrefDefault::Str("")),
    pref(keys::EXPORT_PATH, PrefDefault::Str("")),
];

pub fn definition(key: &str) -> Option<&'static PrefDefinition> {
    DEFINITIONS.iter().find(|d| d.key == key)
}

/// DPI overrides are either -1 (system) or at least [`MIN_DPI`].
pub fn clamp_dpi(dpi: i64) -> i64 {
    match dpi {
        d if d <= 0 => -1,
        d if d < MIN_DPI => MIN_DPI,
        d => d,
    }
}

const CONFIG_FILE_HEADER: &str = "# Lumen configuration\n\
# Keys are written as section/name; delete a line to restore its default.\n\n";

/// Typed key/value store persisted as TOML.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, ConfValue>,
}

impl ConfigStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load config from file, or create one holding the defaults.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut store = Self {
                path: Some(path.to_path_buf()),
                values: BTreeMap::new(),
            };
            for def in DEFINITIONS {
                store.values.insert(def.key.to_string(), def.default.to_value());
            }
            store.save()?;
            tracing::info!(path = %path.display(), "created default configuration");
            return Ok(store);
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PrefsError::io("read", path, e))?;
        let values = toml::from_str(&content).map_err(|source| PrefsError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the store back to its file; in-memory stores do nothing.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| PrefsError::io("create", parent, e))?;
        }
        let mut content = String::from(CONFIG_FILE_HEADER);
        content.push_str(&toml::to_string(&self.values)?);
        fs::write(path, content).map_err(|e| PrefsError::io("write", path, e))?;
        Ok(())
    }

    fn default_value(key: &str) -> Option<ConfValue> {
        definition(key).map(|d| d.default.to_value())
    }

    fn lookup(&self, key: &str) -> Option<ConfValue> {
        self.values.get(key).cloned().or_else(|| Self::default_value(key))
    }

    fn clamp(key: &str, value: f64) -> f64 {
        match definition(key) {
            Some(PrefDefinition {
                min: Some(min),
                max: Some(max),
                ..
            }) => value.clamp(*min, *max),
            _ => value,
        }
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.lookup(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    pub fn get_int(&self, key: &str) -> i64 {
        let value = self.lookup(key).and_then(|v| v.as_int()).unwrap_or(0);
        Self::clamp(key, value as f64) as i64
    }

    pub fn get_float(&self, key: &str) -> f64 {
        let value = self.lookup(key).and_then(|v| v.as_float()).unwrap_or(0.0);
        Self::clamp(key, value)
    }

    pub fn get_string(&self, key: &str) -> String {
        self.lookup(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), ConfValue::Bool(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        let value = Self::clamp(key, value as f64) as i64;
        self.values.insert(key.to_string(), ConfValue::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.values
            .insert(key.to_string(), ConfValue::Float(Self::clamp(key, value)));
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), ConfValue::Str(value.to_string()));
    }

    /// Restores a known key to its default. Returns false for unknown keys.
    pub fn reset(&mut self, key: &str) -> bool {
        match Self::default_value(key) {
            Some(value) => {
                self.values.insert(key.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn is_default(&self, key: &str) -> bool {
        match (self.values.get(key), Self::default_value(key)) {
            (None, _) => true,
            (Some(value), Some(default)) => *value == default,
            (Some(_), None) => false,
        }
    }

    /// Resets a font size outside 5–20 to [`FALLBACK_FONT_SIZE`].
    pub fn normalize_font_size(&mut self) {
        let size = self.get_float(keys::FONT_SIZE);
        if !(5.0..=20.0).contains(&size) {
            self.set_float(keys::FONT_SIZE, FALLBACK_FONT_SIZE);
        }
    }
}

/// Where the application keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    /// Platform directories, falling back to the working directory.
    pub fn from_system() -> Self {
        let base = |dir: Option<PathBuf>| dir.unwrap_or_else(|| PathBuf::from(".")).join("lumen");
        Self::new(base(dirs::config_dir()), base(dirs::data_dir()))
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("lumenrc.toml")
    }

    pub fn keybinding_file(&self) -> PathBuf {
        self.config_dir.join("keyboardrc.toml")
    }

    pub fn default_keybinding_file(&self) -> PathBuf {
        self.data_dir.join("keyboardrc_default.toml")
    }

    pub fn user_css_file(&self) -> PathBuf {
        self.config_dir.join("user.css")
    }

    pub fn presets_database(&self) -> PathBuf {
        self.config_dir.join("data.db")
    }

    /// Theme directories, data dir first.
    pub fn theme_dirs(&self) -> [PathBuf; 2] {
        [self.data_dir.join("themes"), self.config_dir.join("themes")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_values() {
        let store = ConfigStore::in_memory();
        assert_eq!(store.get_string(keys::THEME), "lumen");
        assert_eq!(store.get_int(keys::SCREEN_DPI_OVERWRITE), -1);
        assert!(store.get_bool(keys::USE_SYSTEM_FONT));
        assert_eq!(store.get_float(keys::FONT_SIZE), 12.0);
        assert_eq!(store.get_string("no/such/key"), "");
    }

    #[test]
    fn test_bounds_are_enforced() {
        let mut store = ConfigStore::in_memory();
        store.set_float(keys::FONT_SIZE, 99.0);
        assert_eq!(store.get_float(keys::FONT_SIZE), 30.0);
        store.set_int(keys::SCREEN_DPI_OVERWRITE, -20);
        assert_eq!(store.get_int(keys::SCREEN_DPI_OVERWRITE), -1);
    }

    #[test]
    fn test_reset() {
        let mut store = ConfigStore::in_memory();
        store.set_string(keys::THEME, "lumen-light");
        assert!(!store.is_default(keys::THEME));
        assert!(store.reset(keys::THEME));
        assert!(store.is_default(keys::THEME));
        assert!(!store.reset("no/such/key"));
    }

    #[test]
    fn test_normalize_font_size() {
        let mut store = ConfigStore::in_memory();
        store.set_float(keys::FONT_SIZE, 25.0);
        store.normalize_font_size();
        assert_eq!(store.get_float(keys::FONT_SIZE), FALLBACK_FONT_SIZE);
        store.set_float(keys::FONT_SIZE, 9.0);
        store.normalize_font_size();
        assert_eq!(store.get_float(keys::FONT_SIZE), 9.0);
    }

    #[test]
    fn test_clamp_dpi() {
        assert_eq!(clamp_dpi(0), -1);
        assert_eq!(clamp_dpi(-1), -1);
        assert_eq!(clamp_dpi(10), MIN_DPI);
        assert_eq!(clamp_dpi(96), 96);
    }

    #[test]
    fn test_int_read_from_float_value() {
        let mut store = ConfigStore::in_memory();
        store.set_float(keys::DIALOG_WIDTH, 900.7);
        assert_eq!(store.get_int(keys::DIALOG_WIDTH), 900);
    }
}
