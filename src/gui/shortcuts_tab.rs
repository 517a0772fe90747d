//! Shortcuts tab: accelerator tree, search and key-binding files.

use crate::accel::{AccelNode, NodeKind, NodePath};
use crate::config::keys;
use crate::controller::{KeyResponse, PreferencesController};
use crate::gui::PrefsGui;
use crate::gui::types::{Confirmation, NoticeKind};
use crate::gui::utils;
use eframe::egui;

/// Height reserved below the tree for the button row.
const BUTTON_ROW_HEIGHT: f32 = 36.0;

enum TreeAction {
    Select(NodePath),
    Activate(NodePath),
    Toggle(NodePath),
}

impl PrefsGui {
    pub(super) fn render_shortcuts_tab(&mut self, ui: &mut egui::Ui) {
        let t = self.translations.clone();
        self.handle_shortcut_keys(ui.ctx());

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_query)
                    .hint_text(t.search_hint())
                    .desired_width(260.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if response.changed() || submitted {
                if self.controller.search(&self.search_query).is_some() {
                    self.scroll_to_selection = true;
                }
                if submitted {
                    response.request_focus();
                }
            }
        });
        ui.label(egui::RichText::new(t.shortcuts_hint()).small().weak());
        ui.separator();

        let mut actions = Vec::new();
        let tree_height = (ui.available_height() - BUTTON_ROW_HEIGHT).max(80.0);
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height(tree_height)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(t.shortcut_header());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.strong(t.binding_header());
                    });
                });
                let mut prefix = NodePath::new();
                render_nodes(
                    ui,
                    self.controller.accel_tree().roots(),
                    &mut prefix,
                    &self.controller,
                    self.scroll_to_selection,
                    &mut actions,
                );
            });
        self.scroll_to_selection = false;

        for action in actions {
            match action {
                TreeAction::Select(node) => self.controller.select(node),
                TreeAction::Activate(node) => self.controller.activate(node),
                TreeAction::Toggle(node) => {
                    let expanded = self.controller.is_expanded(&node);
                    self.controller.set_expanded(&node, !expanded);
                    self.controller.select(node);
                }
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button(t.import_button()).clicked() {
                self.import_keybindings();
            }
            if ui.button(t.export_button()).clicked() {
                self.export_keybindings();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(t.restore_defaults_button()).clicked() {
                    self.controller.cancel_remap();
                    self.confirmation = Some(Confirmation::RestoreDefaults);
                }
            });
        });
    }

    /// Feeds key presses to the controller: a pending remap takes every
    /// key, otherwise Enter activates and Backspace clears the selection.
    fn handle_shortcut_keys(&mut self, ctx: &egui::Context) {
        if self.confirmation.is_some() || self.controller.pending_remap().is_some() {
            return;
        }
        if !self.controller.is_awaiting_key() && ctx.wants_keyboard_input() {
            return;
        }
        let events = ctx.input(utils::key_events);
        for event in events {
            if !self.controller.is_awaiting_key()
                && event.key.name() == "Return"
                && event.mods.is_empty()
            {
                if let Some(node) = self.controller.selected().cloned() {
                    self.controller.activate(node);
                }
                continue;
            }
            match self.controller.handle_key(&event) {
                Ok(KeyResponse::NeedsConfirmation(_)) => break,
                Ok(KeyResponse::Applied { cleared, .. }) => {
                    tracing::debug!(cleared = cleared.len(), "binding applied");
                }
                Ok(KeyResponse::Cleared(_) | KeyResponse::Ignored) => {}
                Err(e) => self.report_error(&e),
            }
        }
    }

    fn import_keybindings(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title(self.translations.import_dialog_title())
            .add_filter("key bindings", &["toml"]);
        if let Some(dir) = self.controller.last_dir(keys::IMPORT_PATH) {
            dialog = dialog.set_directory(dir);
        }
        let Some(file) = dialog.pick_file() else {
            return;
        };
        match self.controller.import_keybindings(&file) {
            Ok(_) => {
                let text = self.translations.shortcuts_imported().to_string();
                self.notify(NoticeKind::Info, text);
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn export_keybindings(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title(self.translations.export_dialog_title())
            .set_file_name("keyboardrc.toml")
            .add_filter("key bindings", &["toml"]);
        if let Some(dir) = self.controller.last_dir(keys::EXPORT_PATH) {
            dialog = dialog.set_directory(dir);
        }
        let Some(file) = dialog.save_file() else {
            return;
        };
        match self.controller.export_keybindings(&file) {
            Ok(()) => {
                let text = self.translations.shortcuts_exported().to_string();
                self.notify(NoticeKind::Info, text);
            }
            Err(e) => self.report_error(&e),
        }
    }
}

/// Draws one tree level, collecting clicks into `actions`.
fn render_nodes(
    ui: &mut egui::Ui,
    nodes: &[AccelNode],
    prefix: &mut NodePath,
    controller: &PreferencesController,
    scroll_to_selection: bool,
    actions: &mut Vec<TreeAction>,
) {
    for (index, node) in nodes.iter().enumerate() {
        prefix.push(index);
        let selected = controller
            .selected()
            .is_some_and(|s| s.as_slice() == prefix.as_slice());

        let response = match &node.kind {
            NodeKind::Branch { children } => {
                let expanded = controller.is_expanded(prefix);
                let arrow = if expanded { "⏷" } else { "⏵" };
                let response = ui.selectable_label(selected, format!("{arrow} {}", node.label));
                if response.clicked() {
                    actions.push(TreeAction::Toggle(prefix.clone()));
                }
                if expanded {
                    let id = egui::Id::new(("accel_tree", prefix.as_slice()));
                    ui.indent(id, |ui| {
                        render_nodes(ui, children, prefix, controller, scroll_to_selection, actions);
                    });
                }
                response
            }
            NodeKind::Leaf { binding_label } => {
                let response = ui
                    .horizontal(|ui| {
                        let response = ui.selectable_label(selected, &node.label);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(binding_label);
                        });
                        response
                    })
                    .inner;
                if response.double_clicked() {
                    actions.push(TreeAction::Activate(prefix.clone()));
                } else if response.clicked() {
                    actions.push(TreeAction::Select(prefix.clone()));
                }
                response
            }
        };

        if selected && scroll_to_selection {
            response.scroll_to_me(Some(egui::Align::Center));
        }
        prefix.pop();
    }
}
