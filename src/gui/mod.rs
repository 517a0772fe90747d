//! GUI module for the preferences dialog.
//!
//! Renders the dialog with `egui`; every state change goes through
//! [`PreferencesController`].

mod dialogs;
mod error_dialog;
mod fonts;
mod general_tab;
mod presets_tab;
mod shortcuts_tab;
mod types;
mod utils;
mod window;

use crate::config::keys;
use crate::controller::PreferencesController;
use crate::gui::types::{Confirmation, NoticeKind, Tab};
use crate::i18n::CachedTranslations;
use crate::presets::PresetRow;
use crate::theme::Theme;
use eframe::egui;
use std::time::{Duration, Instant};

pub use error_dialog::show_error;

/// How long a notification stays on screen.
const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Main GUI application structure.
pub struct PrefsGui {
    controller: PreferencesController,
    /// Cached translations for the interface language
    translations: CachedTranslations,
    tab: Tab,
    search_query: String,
    /// Scroll the shortcut tree to the selection on the next frame
    scroll_to_selection: bool,
    confirmation: Option<Confirmation>,
    /// Preset being edited, with its unsaved changes
    preset_editor: Option<PresetRow>,
    /// Text of the user CSS editor
    css_text: String,
    notice: Option<(NoticeKind, String, Instant)>,
    /// Visuals derived from the current theme
    cached_visuals: egui::Visuals,
    font_size: f32,
    /// DPI value being edited, committed when editing ends
    dpi_edit: i64,
}

impl PrefsGui {
    pub fn new(controller: PreferencesController) -> Self {
        let translations = CachedTranslations::new(controller.language());
        let cached_visuals = Self::create_visuals(&controller.current_theme());
        let css_text = controller.user_css();
        let font_size = controller.config().get_float(keys::FONT_SIZE) as f32;
        let dpi_edit = controller.config().get_int(keys::SCREEN_DPI_OVERWRITE);

        Self {
            controller,
            translations,
            tab: Tab::default(),
            search_query: String::new(),
            scroll_to_selection: false,
            confirmation: None,
            preset_editor: None,
            css_text,
            notice: None,
            cached_visuals,
            font_size,
            dpi_edit,
        }
    }

    /// Builds egui visuals for a theme.
    fn create_visuals(theme: &Theme) -> egui::Visuals {
        let mut visuals = if theme.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.active.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.open.corner_radius = egui::CornerRadius::same(4);

        if theme.dark {
            visuals.window_fill = egui::Color32::from_rgb(43, 43, 43);
            visuals.panel_fill = egui::Color32::from_rgb(51, 51, 51);
            visuals.faint_bg_color = egui::Color32::from_rgb(58, 58, 58);
            visuals.extreme_bg_color = egui::Color32::from_rgb(34, 34, 34);
        } else {
            visuals.window_fill = egui::Color32::from_rgb(221, 221, 221);
            visuals.panel_fill = egui::Color32::from_rgb(210, 210, 210);
            visuals.faint_bg_color = egui::Color32::from_rgb(200, 200, 200);
            visuals.extreme_bg_color = egui::Color32::from_rgb(235, 235, 235);
        }

        if let Some(bg) = theme.colors.bg {
            visuals.panel_fill = utils::color(bg);
            visuals.window_fill = utils::color(bg);
        }
        if let Some(fg) = theme.colors.fg {
            visuals.override_text_color = Some(utils::color(fg));
        }
        if let Some(selected) = theme.colors.selected_bg {
            visuals.selection.bg_fill = utils::color(selected);
        }

        visuals
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.cached_visuals = Self::create_visuals(theme);
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some((kind, text.into(), Instant::now() + NOTICE_DURATION));
    }

    /// Reports an operation's failure to the user.
    fn report_error(&mut self, error: &crate::error::PrefsError) {
        tracing::error!(error = %error, "preferences operation failed");
        let text = self.translations.format_save_failed(&error.to_string());
        self.notify(NoticeKind::Error, text);
    }

    /// Launches the preferences window.
    ///
    /// # Errors
    ///
    /// Returns an error if the GUI framework fails to initialize or run.
    pub fn run(controller: PreferencesController) -> anyhow::Result<()> {
        let (width, height) = controller.dialog_size();
        let title = CachedTranslations::new(controller.language())
            .dialog_title()
            .to_string();

        let viewport = egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([400.0, 300.0])
            .with_resizable(true)
            .with_title(title);

        let options = eframe::NativeOptions {
            viewport,
            ..Default::default()
        };

        let language = controller.language();
        let use_system_font = controller.config().get_bool(keys::USE_SYSTEM_FONT);
        let dpi = controller.config().get_int(keys::SCREEN_DPI_OVERWRITE);

        eframe::run_native(
            "lumen-prefs",
            options,
            Box::new(move |cc| {
                fonts::load_fonts(&cc.egui_ctx, language, use_system_font);
                if dpi > 0 {
                    cc.egui_ctx.set_pixels_per_point(dpi as f32 / 96.0);
                }
                let gui = PrefsGui::new(controller);
                fonts::apply_font_size(&cc.egui_ctx, gui.font_size);
                Ok(Box::new(gui))
            }),
        )
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
    }
}
