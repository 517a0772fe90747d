use serde::{Deserialize, Serialize};

/// Upper bound stored for an open focal-length range.
pub const FOCAL_LENGTH_MAX: f32 = 1000.0;

/// Camera and exposure ranges a preset is automatically applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoApplyFilter {
    pub maker: String,
    pub model: String,
    pub lens: String,
    pub iso_min: f32,
    pub iso_max: f32,
    pub exposure_min: f32,
    pub exposure_max: f32,
    pub aperture_min: f32,
    pub aperture_max: f32,
    pub focal_length_min: f32,
    pub focal_length_max: f32,
}

impl Default for AutoApplyFilter {
    /// Matches every image.
    fn default() -> Self {
        Self {
            maker: "%".to_string(),
            model: "%".to_string(),
            lens: "%".to_string(),
            iso_min: 0.0,
            iso_max: f32::MAX,
            exposure_min: 0.0,
            exposure_max: f32::MAX,
            aperture_min: 0.0,
            aperture_max: f32::MAX,
            focal_length_min: 0.0,
            focal_length_max: FOCAL_LENGTH_MAX,
        }
    }
}

/// One row of the `presets` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRow {
    /// Zero until the row is stored.
    pub rowid: i64,
    pub operation: String,
    pub name: String,
    pub description: String,
    pub op_version: i32,
    pub op_params: Vec<u8>,
    pub enabled: bool,
    pub blendop_version: i32,
    pub blendop_params: Vec<u8>,
    pub autoapply: bool,
    pub filter: AutoApplyFilter,
    pub write_protect: bool,
}

impl PresetRow {
    pub fn new(operation: &str, name: &str) -> Self {
        Self {
            rowid: 0,
            operation: operation.to_string(),
            name: name.to_string(),
            description: String::new(),
            op_version: 1,
            op_params: Vec::new(),
            enabled: true,
            blendop_version: 1,
            blendop_params: Vec::new(),
            autoapply: false,
            filter: AutoApplyFilter::default(),
            write_protect: false,
        }
    }
}
