//! Module presets: database rows, preset files and the grouped tree.

pub mod file;
pub mod format;
pub mod row;
pub mod store;
pub mod tree;

pub use file::PRESET_EXTENSION;
pub use row::{AutoApplyFilter, PresetRow};
pub use store::PresetStore;
pub use tree::{ModuleCatalog, PresetEntry, PresetGroup, PresetTree, StaticModuleCatalog};
