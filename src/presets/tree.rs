//! Presets grouped by processing module for display.

use std::cmp::Ordering;

use crate::accel::catalog::PROCESSING_MODULES;
use crate::accel::tree::collate;
use crate::i18n::{Language, module_name};
use crate::presets::format::FilterColumns;
use crate::presets::row::PresetRow;

/// What the preset tree needs to know about the module registry.
pub trait ModuleCatalog {
    /// Display name of an operation; unknown operations show as-is.
    fn localized_name(&self, operation: &str) -> String;
    /// Whether presets of this operation can carry auto-apply filters.
    fn can_autoapply(&self, operation: &str) -> bool;
}

/// Catalogue of the processing modules this crate knows about. Anything
/// else is treated as a utility module, which cannot auto-apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticModuleCatalog {
    language: Language,
}

impl StaticModuleCatalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl ModuleCatalog for StaticModuleCatalog {
    fn localized_name(&self, operation: &str) -> String {
        module_name(self.language, operation).to_string()
    }

    fn can_autoapply(&self, operation: &str) -> bool {
        PROCESSING_MODULES.contains(&operation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetEntry {
    pub rowid: i64,
    pub operation: String,
    pub name: String,
    pub write_protect: bool,
    pub autoapply: bool,
    pub columns: FilterColumns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetGroup {
    pub operation: String,
    /// Localized module name.
    pub label: String,
    pub entries: Vec<PresetEntry>,
}

/// Groups sort by module label, falling back to the operation when the
/// label is empty.
pub fn compare_groups(a: &PresetGroup, b: &PresetGroup) -> Ordering {
    match (a.label.is_empty(), b.label.is_empty()) {
        (true, true) => collate(&a.operation, &b.operation),
        _ => collate(&a.label, &b.label),
    }
}

pub fn compare_entries(a: &PresetEntry, b: &PresetEntry) -> Ordering {
    collate(&a.name, &b.name).then_with(|| a.rowid.cmp(&b.rowid))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetTree {
    groups: Vec<PresetGroup>,
}

impl PresetTree {
    pub fn build(rows: &[PresetRow], catalog: &dyn ModuleCatalog) -> Self {
        let mut groups: Vec<PresetGroup> = Vec::new();
        for row in rows {
            let entry = PresetEntry {
                rowid: row.rowid,
                operation: row.operation.clone(),
                name: row.name.clone(),
                write_protect: row.write_protect,
                autoapply: row.autoapply,
                columns: FilterColumns::new(&row.filter, catalog.can_autoapply(&row.operation)),
            };
            match groups.iter_mut().find(|g| g.operation == row.operation) {
                Some(group) => group.entries.push(entry),
                None => groups.push(PresetGroup {
                    operation: row.operation.clone(),
                    label: catalog.localized_name(&row.operation),
                    entries: vec![entry],
                }),
            }
        }

        groups.sort_by(compare_groups);
        for group in &mut groups {
            group.entries.sort_by(compare_entries);
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[PresetGroup] {
        &self.groups
    }

    pub fn find(&self, rowid: i64) -> Option<&PresetEntry> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.rowid == rowid)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rowid: i64, operation: &str, name: &str) -> PresetRow {
        PresetRow {
            rowid,
            ..PresetRow::new(operation, name)
        }
    }

    #[test]
    fn test_groups_sorted_by_localized_name() {
        let rows = [
            row(1, "exposure", "bright"),
            row(2, "temperature", "daylight"),
            row(3, "crop", "square"),
            row(4, "exposure", "Dark"),
        ];
        let tree = PresetTree::build(&rows, &StaticModuleCatalog::new(Language::English));
        let labels: Vec<_> = tree.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["crop", "exposure", "white balance"]);

        let exposure: Vec<_> = tree.groups()[1].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(exposure, ["bright", "Dark"]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.find(2).map(|e| e.name.as_str()), Some("daylight"));
    }

    #[test]
    fn test_utility_modules_show_no_filter() {
        let tree = PresetTree::build(
            &[row(1, "export", "web"), row(2, "exposure", "bright")],
            &StaticModuleCatalog::new(Language::English),
        );
        let export = tree.find(1).unwrap();
        assert!(export.columns.iso.is_empty());
        assert_eq!(tree.find(2).unwrap().columns.iso, "%");
    }
}
