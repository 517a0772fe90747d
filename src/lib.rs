//! Preferences dialog of the Lumen photo editor.
//!
//! The dialog logic (accelerator tree, remapping, search, presets and the
//! configuration store) lives in the library so it can be driven and tested
//! without a window; [`gui`] renders it with egui.

pub mod accel;
pub mod config;
pub mod controller;
pub mod error;
pub mod gui;
pub mod i18n;
pub mod logging;
pub mod presets;
pub mod theme;

// Re-export types for test modules
pub use config::{AppPaths, ConfigStore};
pub use controller::{KeyResponse, PreferencesController};
pub use error::{PrefsError, Result};
pub use i18n::{CachedTranslations, Language};
