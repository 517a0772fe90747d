//! Presets tab: presets grouped by module, with import and export.

use crate::config::keys;
use crate::gui::PrefsGui;
use crate::gui::types::{Confirmation, NoticeKind};
use crate::gui::utils::truncate_text;
use crate::presets::{PRESET_EXTENSION, PresetEntry};
use eframe::egui;

/// Longest preset name shown before truncating.
const NAME_MAX_CHARS: usize = 40;

enum PresetAction {
    Edit(i64),
    Delete(i64),
}

impl PrefsGui {
    pub(super) fn render_presets_tab(&mut self, ui: &mut egui::Ui) {
        let t = self.translations.clone();
        let mut action = None;

        let list_height = (ui.available_height() - 36.0).max(80.0);
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .max_height(list_height)
            .show(ui, |ui| {
                for group in self.controller.preset_tree().groups() {
                    let title = if group.label.is_empty() {
                        group.operation.as_str()
                    } else {
                        group.label.as_str()
                    };
                    egui::CollapsingHeader::new(title)
                        .id_salt(("preset_group", group.operation.as_str()))
                        .default_open(true)
                        .show(ui, |ui| {
                            egui::Grid::new(("preset_grid", group.operation.as_str()))
                                .num_columns(12)
                                .spacing([14.0, 4.0])
                                .striped(true)
                                .show(ui, |ui| {
                                    preset_header(ui, &t);
                                    for entry in &group.entries {
                                        if let Some(a) = preset_row(ui, entry, &t) {
                                            action = Some(a);
                                        }
                                    }
                                });
                        });
                }
            });

        match action {
            Some(PresetAction::Edit(rowid)) => self.open_preset_editor(rowid),
            Some(PresetAction::Delete(rowid)) => self.ask_delete_preset(rowid),
            None => {}
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(t.import_button()).clicked() {
                self.import_presets();
            }
            if ui.button(t.export_button()).clicked() {
                self.export_presets();
            }
        });
    }

    fn open_preset_editor(&mut self, rowid: i64) {
        match self.controller.preset(rowid) {
            Ok(row) if row.write_protect => {
                let text = self.translations.write_protected().to_string();
                self.notify(NoticeKind::Error, text);
            }
            Ok(row) => self.preset_editor = Some(row),
            Err(e) => self.report_error(&e),
        }
    }

    fn ask_delete_preset(&mut self, rowid: i64) {
        let Some(entry) = self.controller.preset_tree().find(rowid) else {
            return;
        };
        if entry.write_protect {
            let text = self.translations.write_protected().to_string();
            self.notify(NoticeKind::Error, text);
            return;
        }
        self.confirmation = Some(Confirmation::DeletePreset {
            rowid,
            name: entry.name.clone(),
        });
    }

    fn import_presets(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title(self.translations.import_dialog_title())
            .add_filter("presets", &[PRESET_EXTENSION]);
        if let Some(dir) = self.controller.last_dir(keys::IMPORT_PATH) {
            dialog = dialog.set_directory(dir);
        }
        let Some(files) = dialog.pick_files() else {
            return;
        };
        match self.controller.import_presets(&files) {
            Ok(count) => {
                let text = self.translations.format_presets_imported(count);
                self.notify(NoticeKind::Info, text);
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn export_presets(&mut self) {
        let mut dialog =
            rfd::FileDialog::new().set_title(self.translations.export_dialog_title());
        if let Some(dir) = self.controller.last_dir(keys::EXPORT_PATH) {
            dialog = dialog.set_directory(dir);
        }
        let Some(dir) = dialog.pick_folder() else {
            return;
        };
        match self.controller.export_presets(&dir) {
            Ok(count) => {
                let text = self.translations.format_presets_exported(count);
                self.notify(NoticeKind::Info, text);
            }
            Err(e) => self.report_error(&e),
        }
    }
}

fn preset_header(ui: &mut egui::Ui, t: &crate::i18n::CachedTranslations) {
    for header in [
        t.preset_name_header(),
        t.write_protect_header(),
        t.auto_apply_header(),
        t.model_header(),
        t.maker_header(),
        t.lens_header(),
        t.iso_header(),
        t.exposure_header(),
        t.aperture_header(),
        t.focal_length_header(),
    ] {
        ui.strong(header);
    }
    ui.label("");
    ui.label("");
    ui.end_row();
}

fn preset_row(
    ui: &mut egui::Ui,
    entry: &PresetEntry,
    t: &crate::i18n::CachedTranslations,
) -> Option<PresetAction> {
    let mut action = None;
    let name = ui.add(
        egui::Label::new(truncate_text(&entry.name, NAME_MAX_CHARS)).sense(egui::Sense::click()),
    );
    if name.double_clicked() {
        action = Some(PresetAction::Edit(entry.rowid));
    }
    ui.label(if entry.write_protect { "🔒" } else { "" });
    ui.label(if entry.autoapply { "✔" } else { "" });
    let columns = &entry.columns;
    ui.label(&columns.model);
    ui.label(&columns.maker);
    ui.label(&columns.lens);
    ui.label(&columns.iso);
    ui.label(&columns.exposure);
    ui.label(&columns.aperture);
    ui.label(&columns.focal_length);

    let editable = !entry.write_protect;
    if ui
        .add_enabled(editable, egui::Button::new(t.edit_button()).small())
        .clicked()
    {
        action = Some(PresetAction::Edit(entry.rowid));
    }
    if ui
        .add_enabled(editable, egui::Button::new(t.delete_button()).small())
        .clicked()
    {
        action = Some(PresetAction::Delete(entry.rowid));
    }
    ui.end_row();
    action
}
