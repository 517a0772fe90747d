//! Theme discovery and the user CSS tweaks file.
//!
//! Themes are `*.css` files. Only `@define-color` statements for the
//! background, foreground and selection colors are honoured; they are mapped
//! onto egui visuals by the GUI.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrefsError, Result};

pub const BUILTIN_THEMES: [&str; 2] = ["lumen", "lumen-light"];
pub const DEFAULT_USER_CSS: &str = "/* Enter CSS theme tweaks here */\n\n";

/// Theme names: built-ins first, then every `*.css` stem found in `dirs`.
pub fn discover_themes(dirs: &[PathBuf]) -> Vec<String> {
    let mut found = BTreeSet::new();
    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "css")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                found.insert(stem.to_string());
            }
        }
    }
    let mut themes: Vec<String> = BUILTIN_THEMES.iter().map(|s| s.to_string()).collect();
    themes.extend(found.into_iter().filter(|t| !BUILTIN_THEMES.contains(&t.as_str())));
    themes
}

/// File of a theme; a theme in a later directory shadows an earlier one.
pub fn theme_file(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter()
        .rev()
        .map(|d| d.join(format!("{name}.css")))
        .find(|p| p.is_file())
}

/// Contents of the user CSS file, or the placeholder when there is none.
pub fn load_user_css(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|_| DEFAULT_USER_CSS.to_string())
}

pub fn save_user_css(path: &Path, css: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PrefsError::io("create", parent, e))?;
    }
    fs::write(path, css).map_err(|e| PrefsError::io("write", path, e))
}

pub type Rgb = [u8; 3];

/// Colors a stylesheet overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeColors {
    pub bg: Option<Rgb>,
    pub fg: Option<Rgb>,
    pub selected_bg: Option<Rgb>,
}

impl ThemeColors {
    /// Later values win.
    pub fn merge(&mut self, other: ThemeColors) {
        self.bg = other.bg.or(self.bg);
        self.fg = other.fg.or(self.fg);
        self.selected_bg = other.selected_bg.or(self.selected_bg);
    }
}

fn parse_hex_color(text: &str) -> Option<Rgb> {
    let hex = text.trim().strip_prefix('#')?;
    match hex.len() {
        6 => {
            let bytes = hex::decode(hex).ok()?;
            Some([bytes[0], bytes[1], bytes[2]])
        }
        3 => {
            let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
            let bytes = hex::decode(doubled).ok()?;
            Some([bytes[0], bytes[1], bytes[2]])
        }
        _ => None,
    }
}

/// Reads `@define-color name #rrggbb;` statements.
pub fn parse_define_colors(css: &str) -> ThemeColors {
    let mut colors = ThemeColors::default();
    for statement in css.split(';') {
        let Some(start) = statement.find("@define-color") else {
            continue;
        };
        let rest = &statement[start + "@define-color".len()..];
        let mut parts = rest.split_whitespace();
        let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Some(rgb) = parse_hex_color(value) else {
            continue;
        };
        match name {
            "bg_color" => colors.bg = Some(rgb),
            "fg_color" => colors.fg = Some(rgb),
            "selected_bg_color" => colors.selected_bg = Some(rgb),
            _ => {}
        }
    }
    colors
}

/// A resolved theme ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub colors: ThemeColors,
}

impl Theme {
    /// Resolves `name` from the theme directories, layering the user CSS on
    /// top when given.
    pub fn resolve(name: &str, dirs: &[PathBuf], user_css: Option<&str>) -> Theme {
        let mut colors = theme_file(dirs, name)
            .and_then(|path| fs::read_to_string(&path).ok())
            .map(|css| parse_define_colors(&css))
            .unwrap_or_default();
        if let Some(css) = user_css {
            colors.merge(parse_define_colors(css));
        }

        let dark = match colors.bg {
            Some([r, g, b]) => {
                let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
                luma < 128.0
            }
            None => !name.contains("light"),
        };
        Theme {
            name: name.to_string(),
            dark,
            colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_themes() {
        let data = tempfile::tempdir().unwrap();
        let config = tempfile::tempdir().unwrap();
        fs::write(data.path().join("darktable-elegant.css"), "").unwrap();
        fs::write(config.path().join("mine.css"), "").unwrap();
        fs::write(config.path().join("lumen.css"), "").unwrap();
        fs::write(config.path().join("notes.txt"), "").unwrap();

        let dirs = [data.path().to_path_buf(), config.path().to_path_buf()];
        assert_eq!(
            discover_themes(&dirs),
            ["lumen", "lumen-light", "darktable-elegant", "mine"]
        );
        assert_eq!(theme_file(&dirs, "mine"), Some(config.path().join("mine.css")));
        assert_eq!(theme_file(&dirs, "absent"), None);
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let dirs = [PathBuf::from("/nonexistent/lumen/themes")];
        assert_eq!(discover_themes(&dirs), ["lumen", "lumen-light"]);
    }

    #[test]
    fn test_user_css_default_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.css");
        assert_eq!(load_user_css(&path), DEFAULT_USER_CSS);
        save_user_css(&path, "@define-color bg_color #fff;").unwrap();
        assert_eq!(load_user_css(&path), "@define-color bg_color #fff;");
    }

    #[test]
    fn test_define_colors() {
        let colors = parse_define_colors(
            "/* comment */\n@define-color bg_color #202020;\n@define-color fg_color #ABC;\n\
             @define-color other #000000;\n@define-color selected_bg_color nonsense;",
        );
        assert_eq!(colors.bg, Some([0x20, 0x20, 0x20]));
        assert_eq!(colors.fg, Some([0xaa, 0xbb, 0xcc]));
        assert_eq!(colors.selected_bg, None);
    }

    #[test]
    fn test_resolve_darkness() {
        assert!(Theme::resolve("lumen", &[], None).dark);
        assert!(!Theme::resolve("lumen-light", &[], None).dark);
        let tweaked = Theme::resolve("lumen", &[], Some("@define-color bg_color #f0f0f0;"));
        assert!(!tweaked.dark);
    }
}
