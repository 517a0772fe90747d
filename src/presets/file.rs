//! Preset files: one TOML document per preset, parameters hex-encoded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrefsError, Result};
use crate::presets::row::{AutoApplyFilter, PresetRow};

pub const PRESET_EXTENSION: &str = "lpreset";

#[derive(Debug, Serialize, Deserialize)]
struct PresetFile {
    preset: PresetDocument,
}

#[derive(Debug, Serialize, Deserialize)]
struct PresetDocument {
    name: String,
    operation: String,
    #[serde(default)]
    description: String,
    op_version: i32,
    op_params: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    blendop_version: i32,
    #[serde(default)]
    blendop_params: String,
    #[serde(default)]
    autoapply: bool,
    #[serde(default)]
    filter: AutoApplyFilter,
}

fn default_enabled() -> bool {
    true
}

/// `<operation>_<name>.lpreset`, with path separators replaced.
pub fn preset_file_name(row: &PresetRow) -> String {
    let stem: String = format!("{}_{}", row.operation, row.name)
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{stem}.{PRESET_EXTENSION}")
}

/// Writes a preset into `dir` and returns the file path.
pub fn save_preset(row: &PresetRow, dir: &Path) -> Result<PathBuf> {
    let file = PresetFile {
        preset: PresetDocument {
            name: row.name.clone(),
            operation: row.operation.clone(),
            description: row.description.clone(),
            op_version: row.op_version,
            op_params: hex::encode(&row.op_params),
            enabled: row.enabled,
            blendop_version: row.blendop_version,
            blendop_params: hex::encode(&row.blendop_params),
            autoapply: row.autoapply,
            filter: row.filter.clone(),
        },
    };
    let path = dir.join(preset_file_name(row));
    fs::write(&path, toml::to_string(&file)?).map_err(|e| PrefsError::io("write", &path, e))?;
    Ok(path)
}

/// Reads a preset file. Imported presets are never write protected.
pub fn load_preset(path: &Path) -> Result<PresetRow> {
    let content = fs::read_to_string(path).map_err(|e| PrefsError::io("read", path, e))?;
    let PresetFile { preset } = toml::from_str(&content).map_err(|source| PrefsError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PresetRow {
        rowid: 0,
        operation: preset.operation,
        name: preset.name,
        description: preset.description,
        op_version: preset.op_version,
        op_params: hex::decode(&preset.op_params)?,
        enabled: preset.enabled,
        blendop_version: preset.blendop_version,
        blendop_params: hex::decode(&preset.blendop_params)?,
        autoapply: preset.autoapply,
        filter: preset.filter,
        write_protect: false,
    })
}
