//! Stand-alone window for errors that stop the dialog from opening.

use eframe::egui;

struct ErrorDialog {
    title: String,
    error_msg: String,
    close_label: String,
}

impl eframe::App for ErrorDialog {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(8);
        visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(8);
        visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(8);
        visuals.widgets.active.corner_radius = egui::CornerRadius::same(8);
        visuals.window_fill = egui::Color32::from_rgb(34, 34, 34);
        visuals.panel_fill = egui::Color32::from_rgb(34, 34, 34);
        ctx.set_visuals(visuals);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&self.title)
                        .size(20.0)
                        .color(egui::Color32::from_rgb(230, 110, 100))
                        .strong(),
                );
            });
            ui.add_space(16.0);

            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(48, 44, 44))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::same(14))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.add(
                        egui::Label::new(egui::RichText::new(&self.error_msg).size(13.0)).wrap(),
                    );
                });

            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                if ui
                    .add_sized([110.0, 30.0], egui::Button::new(&self.close_label))
                    .clicked()
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

/// Displays an error in its own window and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the GUI framework fails to initialize.
pub fn show_error(title: &str, error_msg: &str, close_label: &str) -> anyhow::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([460.0, 260.0])
        .with_resizable(false)
        .with_title(title)
        .with_always_on_top();

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let dialog = ErrorDialog {
        title: title.to_string(),
        error_msg: error_msg.to_string(),
        close_label: close_label.to_string(),
    };
    eframe::run_native(
        "Lumen preferences error",
        options,
        Box::new(|_cc| Ok(Box::new(dialog))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to show error dialog: {}", e))
}
