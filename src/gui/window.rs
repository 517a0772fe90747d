// Dialog window: tab bar, status line and window lifecycle

use crate::gui::PrefsGui;
use crate::gui::types::{NoticeKind, Tab};
use eframe::egui;
use std::time::Instant;

impl eframe::App for PrefsGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.cached_visuals.clone());

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.controller
                .remember_dialog_size(rect.width(), rect.height());
        }

        egui::TopBottomPanel::top("prefs_tabs").show(ctx, |ui| {
            self.render_tab_bar(ui);
        });

        egui::TopBottomPanel::bottom("prefs_status").show(ctx, |ui| {
            self.render_status_line(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::General => self.render_general_tab(ui),
            Tab::Shortcuts => self.render_shortcuts_tab(ui),
            Tab::Presets => self.render_presets_tab(ui),
        });

        self.render_conflict_dialog(ctx);
        self.render_confirmation(ctx);
        self.render_preset_editor(ctx);

        if let Some((_, _, until)) = &self.notice {
            let remaining = until.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.notice = None;
            } else {
                ctx.request_repaint_after(remaining);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.controller.close() {
            tracing::info!("some preferences apply after a restart");
        }
    }
}

impl PrefsGui {
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        let t = self.translations.clone();
        let previous = self.tab;
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, Tab::General, t.tab_general());
            ui.selectable_value(&mut self.tab, Tab::Shortcuts, t.tab_shortcuts());
            ui.selectable_value(&mut self.tab, Tab::Presets, t.tab_presets());
        });
        ui.add_space(4.0);
        if previous == Tab::Shortcuts && self.tab != Tab::Shortcuts {
            self.controller.cancel_remap();
        }
    }

    fn render_status_line(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some((kind, text, _)) = &self.notice {
                let color = match kind {
                    NoticeKind::Info => ui.visuals().text_color(),
                    NoticeKind::Error => ui.visuals().error_fg_color,
                };
                ui.label(egui::RichText::new(text).color(color));
            } else if self.controller.restart_required() {
                ui.label(
                    egui::RichText::new(self.translations.needs_restart())
                        .color(ui.visuals().warn_fg_color),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(self.translations.close_button()).clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}
