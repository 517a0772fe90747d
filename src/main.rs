use anyhow::Result;
use lumen_prefs::gui::{PrefsGui, show_error};
use lumen_prefs::{AppPaths, CachedTranslations, Language, PreferencesController, logging};

fn main() -> Result<()> {
    logging::init();

    let paths = AppPaths::from_system();
    tracing::debug!(config = %paths.config_dir.display(), data = %paths.data_dir.display(), "using directories");

    let controller = match PreferencesController::open(paths) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!(error = %e, "failed to open preferences");
            let t = CachedTranslations::new(Language::system_default());
            let error_msg = format!("Failed to open preferences: {}", e);
            return show_error(t.error_title(), &error_msg, t.error_close_button());
        }
    };

    PrefsGui::run(controller)
}
