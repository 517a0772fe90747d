//! Display strings for the auto-apply columns of the preset tree.
//!
//! Exposure and aperture bounds are snapped to the first table entry that is
//! not smaller than the bound, so `1/100` displays as `1/60`.

use crate::presets::row::{AutoApplyFilter, FOCAL_LENGTH_MAX};

/// Exposure times in seconds, paired with [`EXPOSURE_LABELS`].
pub const EXPOSURE_VALUES: [f32; 24] = [
    0.0,
    1.0 / 8000.0,
    1.0 / 4000.0,
    1.0 / 2000.0,
    1.0 / 1000.0,
    1.0 / 1000.0,
    1.0 / 500.0,
    1.0 / 250.0,
    1.0 / 125.0,
    1.0 / 60.0,
    1.0 / 30.0,
    1.0 / 15.0,
    1.0 / 15.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 2.0,
    1.0,
    2.0,
    4.0,
    8.0,
    15.0,
    30.0,
    60.0,
    f32::MAX,
];

pub const EXPOSURE_LABELS: [&str; 24] = [
    "0", "1/8000", "1/4000", "1/2000", "1/1000", "1/1000", "1/500", "1/250", "1/125", "1/60",
    "1/30", "1/15", "1/15", "1/8", "1/4", "1/2", "1\"", "2\"", "4\"", "8\"", "15\"", "30\"",
    "60\"", "+",
];

/// F-numbers, paired with [`APERTURE_LABELS`].
pub const APERTURE_VALUES: [f32; 19] = [
    0.0,
    0.5,
    0.7,
    1.0,
    1.4,
    2.0,
    2.8,
    4.0,
    5.6,
    8.0,
    11.0,
    16.0,
    22.0,
    32.0,
    45.0,
    64.0,
    90.0,
    128.0,
    f32::MAX,
];

pub const APERTURE_LABELS: [&str; 19] = [
    "f/0", "f/0.5", "f/0.7", "f/1.0", "f/1.4", "f/2", "f/2.8", "f/4", "f/5.6", "f/8", "f/11",
    "f/16", "f/22", "f/32", "f/45", "f/64", "f/90", "f/128", "f/+",
];

/// Shown when a range covers every value.
pub const ANY: &str = "%";

/// Index of the first table entry `>=` the value, clamped to the last entry.
fn bucket(values: &[f32], value: f32) -> usize {
    values
        .iter()
        .position(|&v| value <= v)
        .unwrap_or(values.len() - 1)
}

fn format_bucketed(values: &[f32], labels: &[&str], min: f32, max: f32) -> String {
    let lo = bucket(values, min);
    let hi = bucket(values, max);
    if lo == 0 && hi == values.len() - 1 {
        ANY.to_string()
    } else {
        format!("{} – {}", labels[lo], labels[hi])
    }
}

pub fn format_iso(min: f32, max: f32) -> String {
    if min == 0.0 && max == f32::MAX {
        ANY.to_string()
    } else {
        format!("{} – {}", min as usize, max as usize)
    }
}

pub fn format_exposure(min: f32, max: f32) -> String {
    format_bucketed(&EXPOSURE_VALUES, &EXPOSURE_LABELS, min, max)
}

pub fn format_aperture(min: f32, max: f32) -> String {
    format_bucketed(&APERTURE_VALUES, &APERTURE_LABELS, min, max)
}

pub fn format_focal_length(min: f32, max: f32) -> String {
    let (min, max) = (min as i32, max as i32);
    if min == 0 && max == FOCAL_LENGTH_MAX as i32 {
        ANY.to_string()
    } else {
        format!("{min} – {max}")
    }
}

/// Text of every filter column for one preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterColumns {
    pub maker: String,
    pub model: String,
    pub lens: String,
    pub iso: String,
    pub exposure: String,
    pub aperture: String,
    pub focal_length: String,
}

impl FilterColumns {
    /// Columns for a preset; modules that cannot auto-apply show nothing.
    pub fn new(filter: &AutoApplyFilter, can_autoapply: bool) -> Self {
        if !can_autoapply {
            return Self::default();
        }
        Self {
            maker: filter.maker.clone(),
            model: filter.model.clone(),
            lens: filter.lens.clone(),
            iso: format_iso(filter.iso_min, filter.iso_max),
            exposure: format_exposure(filter.exposure_min, filter.exposure_max),
            aperture: format_aperture(filter.aperture_min, filter.aperture_max),
            focal_length: format_focal_length(filter.focal_length_min, filter.focal_length_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso() {
        assert_eq!(format_iso(0.0, f32::MAX), "%");
        assert_eq!(format_iso(100.0, 400.0), "100 – 400");
        assert_eq!(format_iso(0.0, 3200.9), "0 – 3200");
    }

    #[test]
    fn test_exposure_buckets() {
        assert_eq!(format_exposure(0.0, f32::MAX), "%");
        assert_eq!(format_exposure(1.0 / 100.0, 1.0), "1/60 – 1\"");
        assert_eq!(format_exposure(0.0, 1.0 / 8000.0), "0 – 1/8000");
        assert_eq!(format_exposure(2.0, f32::MAX), "2\" – +");
        assert_eq!(format_exposure(100.0, 120.0), "+ – +");
    }

    #[test]
    fn test_aperture_buckets() {
        assert_eq!(format_aperture(0.0, f32::MAX), "%");
        assert_eq!(format_aperture(1.4, 2.8), "f/1.4 – f/2.8");
        assert_eq!(format_aperture(3.0, 9.0), "f/4 – f/11");
    }

    #[test]
    fn test_focal_length() {
        assert_eq!(format_focal_length(0.0, 1000.0), "%");
        assert_eq!(format_focal_length(24.0, 70.5), "24 – 70");
    }

    #[test]
    fn test_columns_for_module_without_autoapply() {
        let filter = AutoApplyFilter {
            iso_min: 100.0,
            iso_max: 400.0,
            ..AutoApplyFilter::default()
        };
        assert_eq!(FilterColumns::new(&filter, false), FilterColumns::default());

        let columns = FilterColumns::new(&filter, true);
        assert_eq!(columns.iso, "100 – 400");
        assert_eq!(columns.exposure, "%");
        assert_eq!(columns.maker, "%");
    }
}
