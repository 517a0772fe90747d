//! System font loading and text sizing.
//!
//! Loads CJK-capable system fonts for the interface language and applies the
//! font size preference to every text style.

use crate::i18n::Language;
use eframe::egui;
use std::sync::Arc;

/// Font configuration for a system font file.
struct FontConfig {
    name: &'static str,
    path: &'static str,
}

/// Loads system fonts for the selected language.
///
/// With `use_system_font` the system fonts take precedence over egui's
/// built-in ones; otherwise they only fill in missing glyphs.
pub fn load_fonts(ctx: &egui::Context, language: Language, use_system_font: bool) {
    let mut fonts = egui::FontDefinitions::default();
    let mut loaded_count = 0;

    let cjk_y_offset = match language {
        Language::Japanese => 0.2,
        Language::English | Language::SimplifiedChinese | Language::TraditionalChinese => 0.0,
    };

    for config in get_font_configs_for_language(language) {
        let Ok(font_data) = std::fs::read(config.path) else {
            continue;
        };
        let font_data = if cjk_y_offset != 0.0 {
            egui::FontData::from_owned(font_data).tweak(egui::FontTweak {
                y_offset_factor: cjk_y_offset,
                ..Default::default()
            })
        } else {
            egui::FontData::from_owned(font_data)
        };

        fonts
            .font_data
            .insert(config.name.to_string(), Arc::new(font_data));

        let proportional = fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default();
        if use_system_font {
            proportional.insert(loaded_count, config.name.to_string());
        } else {
            proportional.push(config.name.to_string());
        }

        fonts
            .families
            .entry(egui::FontFamily::Monospace)
            .or_default()
            .push(config.name.to_string());

        loaded_count += 1;
    }

    if loaded_count == 0 && language != Language::English {
        tracing::warn!(
            ?language,
            "no system fonts loaded, CJK characters may not display correctly"
        );
    }

    ctx.set_fonts(fonts);
}

/// Scales every text style so body text is `size` points.
pub fn apply_font_size(ctx: &egui::Context, size: f32) {
    let default_body = egui::Style::default()
        .text_styles
        .get(&egui::TextStyle::Body)
        .map(|f| f.size)
        .unwrap_or(12.5);
    let scale = size / default_body;
    let defaults = egui::Style::default().text_styles;
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            if let Some(default) = defaults.get(text_style) {
                font_id.size = default.size * scale;
            }
        }
    });
}

/// Returns font configurations prioritized by language.
fn get_font_configs_for_language(language: Language) -> Vec<FontConfig> {
    match language {
        Language::SimplifiedChinese => vec![
            FontConfig {
                name: "Noto Sans CJK SC",
                path: "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            },
            FontConfig {
                name: "WenQuanYi Micro Hei",
                path: "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            },
        ],

        Language::TraditionalChinese => vec![
            FontConfig {
                name: "Noto Sans CJK TC",
                path: "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            },
            FontConfig {
                name: "AR PL UMing",
                path: "/usr/share/fonts/truetype/arphic/uming.ttc",
            },
        ],

        Language::Japanese => vec![
            FontConfig {
                name: "Noto Sans CJK JP",
                path: "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            },
            FontConfig {
                name: "IPAGothic",
                path: "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
            },
        ],

        Language::English => vec![FontConfig {
            name: "DejaVu Sans",
            path: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        }],
    }
}
