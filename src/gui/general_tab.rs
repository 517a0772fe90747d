//! General tab: language, theme, fonts and user CSS.

use crate::config::{definition, keys};
use crate::gui::PrefsGui;
use crate::gui::fonts;
use crate::gui::types::NoticeKind;
use crate::i18n::Language;
use eframe::egui;

impl PrefsGui {
    pub(super) fn render_general_tab(&mut self, ui: &mut egui::Ui) {
        let t = self.translations.clone();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("general_grid")
                    .num_columns(2)
                    .spacing([24.0, 10.0])
                    .striped(true)
                    .show(ui, |ui| {
                        self.pref_label(ui, keys::GUI_LANGUAGE, t.interface_language())
                            .on_hover_text(t.language_tooltip());
                        self.render_language_combo(ui);
                        ui.end_row();

                        self.pref_label(ui, keys::THEME, t.theme_label())
                            .on_hover_text(t.theme_tooltip());
                        self.render_theme_combo(ui);
                        ui.end_row();

                        self.pref_label(ui, keys::PERFORMANCE, t.performance_label());
                        let mut performance = self.controller.config().get_bool(keys::PERFORMANCE);
                        if ui.checkbox(&mut performance, "").changed() {
                            self.controller.set_bool(keys::PERFORMANCE, performance);
                            ui.ctx().style_mut(|s| {
                                s.animation_time = if performance { 0.0 } else { 1.0 / 12.0 }
                            });
                        }
                        ui.end_row();

                        self.pref_label(ui, keys::USE_SYSTEM_FONT, t.system_font_label());
                        let mut system_font = self.controller.config().get_bool(keys::USE_SYSTEM_FONT);
                        if ui.checkbox(&mut system_font, "").changed() {
                            self.controller.set_bool(keys::USE_SYSTEM_FONT, system_font);
                            fonts::load_fonts(ui.ctx(), self.controller.language(), system_font);
                        }
                        ui.end_row();

                        self.pref_label(ui, keys::FONT_SIZE, t.font_size_label());
                        let response = ui.add_enabled(
                            !system_font,
                            egui::DragValue::new(&mut self.font_size)
                                .range(5.0..=30.0)
                                .speed(0.1)
                                .max_decimals(1),
                        );
                        if response.changed() {
                            self.controller
                                .set_float(keys::FONT_SIZE, f64::from(self.font_size));
                            fonts::apply_font_size(ui.ctx(), self.font_size);
                        }
                        ui.end_row();

                        self.pref_label(ui, keys::SCREEN_DPI_OVERWRITE, t.dpi_label())
                            .on_hover_text(t.dpi_tooltip());
                        let response =
                            ui.add(egui::DragValue::new(&mut self.dpi_edit).range(-1..=360));
                        if response.drag_stopped() || response.lost_focus() {
                            self.controller.set_dpi(self.dpi_edit);
                            self.dpi_edit =
                                self.controller.config().get_int(keys::SCREEN_DPI_OVERWRITE);
                        }
                        ui.end_row();
                    });

                ui.add_space(12.0);
                self.render_user_css(ui);
            });
    }

    /// Label of a preference row. Double-clicking it restores the default;
    /// modified values are shown in bold.
    fn pref_label(&mut self, ui: &mut egui::Ui, key: &str, text: &str) -> egui::Response {
        let mut rich = egui::RichText::new(text);
        if !self.controller.config().is_default(key) {
            rich = rich.strong();
        }
        let mut response = ui.add(egui::Label::new(rich).sense(egui::Sense::click()));
        if let Some(def) = definition(key) {
            let hint = self.translations.format_reset_hint(&def.default.display());
            response = response.on_hover_text(hint);
        }
        if response.double_clicked() {
            self.controller.reset_pref(key);
            self.sync_from_config(ui.ctx());
        }
        response
    }

    fn render_language_combo(&mut self, ui: &mut egui::Ui) {
        let system = Language::system_default();
        let mut current = self.controller.chosen_language().unwrap_or(system);
        let before = current;
        egui::ComboBox::from_id_salt("language_combo")
            .selected_text(self.translations.format_language_entry(current, system))
            .show_ui(ui, |ui| {
                for &lang in Language::all() {
                    let text = self.translations.format_language_entry(lang, system);
                    ui.selectable_value(&mut current, lang, text);
                }
            });
        if current != before {
            // the system language is stored as "follow the system"
            let choice = (current != system).then_some(current);
            self.controller.set_language(choice);
        }
    }

    fn render_theme_combo(&mut self, ui: &mut egui::Ui) {
        let themes = self.controller.themes();
        let mut current = self.controller.config().get_string(keys::THEME);
        let before = current.clone();
        egui::ComboBox::from_id_salt("theme_combo")
            .selected_text(&current)
            .show_ui(ui, |ui| {
                for theme in &themes {
                    ui.selectable_value(&mut current, theme.clone(), theme);
                }
            });
        if current != before {
            let theme = self.controller.set_theme(&current);
            self.apply_theme(&theme);
        }
    }

    fn render_user_css(&mut self, ui: &mut egui::Ui) {
        let t = self.translations.clone();
        ui.horizontal(|ui| {
            let mut enabled = self.controller.config().get_bool(keys::USER_CSS);
            if ui.checkbox(&mut enabled, t.usercss_label()).changed() {
                self.controller.set_bool(keys::USER_CSS, enabled);
                let theme = self.controller.current_theme();
                self.apply_theme(&theme);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(t.save_css_button()).clicked() {
                    match self.controller.save_user_css(&self.css_text) {
                        Ok(theme) => {
                            self.apply_theme(&theme);
                            self.notify(NoticeKind::Info, t.css_saved());
                        }
                        Err(e) => self.report_error(&e),
                    }
                }
            });
        });
        ui.add(
            egui::TextEdit::multiline(&mut self.css_text)
                .code_editor()
                .desired_rows(12)
                .desired_width(f32::INFINITY),
        );
    }

    /// Re-reads the values this tab caches after a reset.
    fn sync_from_config(&mut self, ctx: &egui::Context) {
        self.font_size = self.controller.config().get_float(keys::FONT_SIZE) as f32;
        self.dpi_edit = self.controller.config().get_int(keys::SCREEN_DPI_OVERWRITE);
        fonts::apply_font_size(ctx, self.font_size);
        let theme = self.controller.current_theme();
        self.apply_theme(&theme);
    }
}
