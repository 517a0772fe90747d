//! Modal questions and the preset editor.

use crate::gui::PrefsGui;
use crate::gui::types::{Confirmation, NoticeKind};
use eframe::egui;

/// Answer given in a yes/no window this frame.
fn ask(ctx: &egui::Context, id: &str, title: &str, message: &str, yes: &str, no: &str) -> Option<bool> {
    let mut answer = None;
    egui::Window::new(title)
        .id(egui::Id::new(id))
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.add(egui::Label::new(message).wrap());
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.add_sized([90.0, 28.0], egui::Button::new(yes)).clicked() {
                    answer = Some(true);
                }
                if ui.add_sized([90.0, 28.0], egui::Button::new(no)).clicked() {
                    answer = Some(false);
                }
            });
        });
    if answer.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        answer = Some(false);
    }
    answer
}

impl PrefsGui {
    /// Asks whether a colliding binding should take over.
    pub(super) fn render_conflict_dialog(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.controller.pending_remap() else {
            return;
        };
        let t = self.translations.clone();
        let message = t.format_conflict(&pending.binding.label(), &pending.conflict_path);
        let Some(accept) = ask(ctx, "conflict_dialog", t.conflict_title(), &message, t.yes(), t.no())
        else {
            return;
        };
        if let Err(e) = self.controller.resolve_conflict(accept) {
            self.report_error(&e);
        }
    }

    pub(super) fn render_confirmation(&mut self, ctx: &egui::Context) {
        let Some(confirmation) = self.confirmation.clone() else {
            return;
        };
        let t = self.translations.clone();
        let (title, message) = match &confirmation {
            Confirmation::RestoreDefaults => {
                (t.restore_title().to_string(), t.restore_message().to_string())
            }
            Confirmation::DeletePreset { name, .. } => {
                (t.delete_title().to_string(), t.format_delete_preset(name))
            }
        };
        let Some(accept) = ask(ctx, "confirmation_dialog", &title, &message, t.yes(), t.no()) else {
            return;
        };
        self.confirmation = None;
        if !accept {
            return;
        }

        match confirmation {
            Confirmation::RestoreDefaults => match self.controller.restore_default_keybindings() {
                Ok(()) => self.notify(NoticeKind::Info, t.shortcuts_restored()),
                Err(e) => self.report_error(&e),
            },
            Confirmation::DeletePreset { rowid, .. } => {
                if let Err(e) = self.controller.delete_preset(rowid) {
                    self.report_error(&e);
                }
            }
        }
    }

    /// Edits the description and auto-apply filter of a preset.
    pub(super) fn render_preset_editor(&mut self, ctx: &egui::Context) {
        let Some(row) = self.preset_editor.as_mut() else {
            return;
        };
        let t = self.translations.clone();
        let mut save = false;
        let mut cancel = false;

        egui::Window::new(t.edit_preset_title())
            .id(egui::Id::new("preset_editor"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.heading(&row.name);
                ui.add_space(6.0);
                egui::Grid::new("preset_editor_grid")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(t.description_label());
                        ui.text_edit_singleline(&mut row.description);
                        ui.end_row();

                        ui.label(t.auto_apply_label());
                        ui.checkbox(&mut row.autoapply, "");
                        ui.end_row();

                        let filter = &mut row.filter;
                        ui.add_enabled_ui(row.autoapply, |ui| ui.label(t.model_header()));
                        ui.add_enabled(row.autoapply, egui::TextEdit::singleline(&mut filter.model));
                        ui.end_row();

                        ui.add_enabled_ui(row.autoapply, |ui| ui.label(t.maker_header()));
                        ui.add_enabled(row.autoapply, egui::TextEdit::singleline(&mut filter.maker));
                        ui.end_row();

                        ui.add_enabled_ui(row.autoapply, |ui| ui.label(t.lens_header()));
                        ui.add_enabled(row.autoapply, egui::TextEdit::singleline(&mut filter.lens));
                        ui.end_row();

                        range_row(ui, row.autoapply, t.iso_header(), &mut filter.iso_min, &mut filter.iso_max, 1.0);
                        range_row(
                            ui,
                            row.autoapply,
                            t.exposure_header(),
                            &mut filter.exposure_min,
                            &mut filter.exposure_max,
                            0.01,
                        );
                        range_row(
                            ui,
                            row.autoapply,
                            t.aperture_header(),
                            &mut filter.aperture_min,
                            &mut filter.aperture_max,
                            0.1,
                        );
                        range_row(
                            ui,
                            row.autoapply,
                            t.focal_length_header(),
                            &mut filter.focal_length_min,
                            &mut filter.focal_length_max,
                            1.0,
                        );
                    });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button(t.save_button()).clicked() {
                        save = true;
                    }
                    if ui.button(t.cancel_button()).clicked() {
                        cancel = true;
                    }
                });
            });

        if save {
            if let Some(row) = self.preset_editor.take()
                && let Err(e) = self.controller.update_preset(&row)
            {
                self.report_error(&e);
            }
        } else if cancel {
            self.preset_editor = None;
        }
    }
}

fn range_row(ui: &mut egui::Ui, enabled: bool, label: &str, min: &mut f32, max: &mut f32, speed: f64) {
    ui.add_enabled_ui(enabled, |ui| ui.label(label));
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(min).speed(speed).range(0.0..=*max));
            ui.label("–");
            ui.add(egui::DragValue::new(max).speed(speed).range(*min..=f32::MAX));
        });
    });
    ui.end_row();
}
