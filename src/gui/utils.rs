//! GUI utility functions.

use crate::accel::{KeyEvent, Modifiers};
use crate::theme::Rgb;
use eframe::egui;

/// Converts egui::Key to the key name used in key-binding files.
pub fn key_name(key: egui::Key) -> Option<&'static str> {
    let name = match key {
        egui::Key::A => "a",
        egui::Key::B => "b",
        egui::Key::C => "c",
        egui::Key::D => "d",
        egui::Key::E => "e",
        egui::Key::F => "f",
        egui::Key::G => "g",
        egui::Key::H => "h",
        egui::Key::I => "i",
        egui::Key::J => "j",
        egui::Key::K => "k",
        egui::Key::L => "l",
        egui::Key::M => "m",
        egui::Key::N => "n",
        egui::Key::O => "o",
        egui::Key::P => "p",
        egui::Key::Q => "q",
        egui::Key::R => "r",
        egui::Key::S => "s",
        egui::Key::T => "t",
        egui::Key::U => "u",
        egui::Key::V => "v",
        egui::Key::W => "w",
        egui::Key::X => "x",
        egui::Key::Y => "y",
        egui::Key::Z => "z",
        egui::Key::Num0 => "0",
        egui::Key::Num1 => "1",
        egui::Key::Num2 => "2",
        egui::Key::Num3 => "3",
        egui::Key::Num4 => "4",
        egui::Key::Num5 => "5",
        egui::Key::Num6 => "6",
        egui::Key::Num7 => "7",
        egui::Key::Num8 => "8",
        egui::Key::Num9 => "9",
        egui::Key::F1 => "F1",
        egui::Key::F2 => "F2",
        egui::Key::F3 => "F3",
        egui::Key::F4 => "F4",
        egui::Key::F5 => "F5",
        egui::Key::F6 => "F6",
        egui::Key::F7 => "F7",
        egui::Key::F8 => "F8",
        egui::Key::F9 => "F9",
        egui::Key::F10 => "F10",
        egui::Key::F11 => "F11",
        egui::Key::F12 => "F12",
        egui::Key::Delete => "Delete",
        egui::Key::Insert => "Insert",
        egui::Key::Home => "Home",
        egui::Key::End => "End",
        egui::Key::PageUp => "Page_Up",
        egui::Key::PageDown => "Page_Down",
        egui::Key::Space => "space",
        egui::Key::Tab => "Tab",
        egui::Key::Escape => "Escape",
        egui::Key::Enter => "Return",
        egui::Key::Backspace => "BackSpace",
        egui::Key::ArrowLeft => "Left",
        egui::Key::ArrowRight => "Right",
        egui::Key::ArrowUp => "Up",
        egui::Key::ArrowDown => "Down",
        egui::Key::Plus => "plus",
        egui::Key::Minus => "minus",
        egui::Key::Equals => "equal",
        egui::Key::Comma => "comma",
        egui::Key::Period => "period",
        egui::Key::Slash => "slash",
        egui::Key::Backslash => "backslash",
        egui::Key::Semicolon => "semicolon",
        egui::Key::OpenBracket => "bracketleft",
        egui::Key::CloseBracket => "bracketright",
        egui::Key::Backtick => "grave",
        _ => return None,
    };
    Some(name)
}

/// Modifier mask of an egui key press.
pub fn modifiers(mods: egui::Modifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.shift);
    out.set(Modifiers::CONTROL, mods.ctrl);
    out.set(Modifiers::ALT, mods.alt);
    out.set(Modifiers::SUPER, mods.mac_cmd);
    out
}

/// Key presses delivered this frame, oldest first.
pub fn key_events(input: &egui::InputState) -> Vec<KeyEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers: mods,
                ..
            } => key_name(*key).map(|name| KeyEvent::new(name, modifiers(*mods))),
            _ => None,
        })
        .collect()
}

pub fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Shortens text at a char boundary, ending it with "...".
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name_letters_are_lowercase() {
        assert_eq!(key_name(egui::Key::A), Some("a"));
        assert_eq!(key_name(egui::Key::Z), Some("z"));
        assert_eq!(key_name(egui::Key::Num5), Some("5"));
    }

    #[test]
    fn test_key_name_special_keys() {
        assert_eq!(key_name(egui::Key::Backspace), Some("BackSpace"));
        assert_eq!(key_name(egui::Key::Enter), Some("Return"));
        assert_eq!(key_name(egui::Key::Space), Some("space"));
        assert_eq!(key_name(egui::Key::PageUp), Some("Page_Up"));
        assert_eq!(key_name(egui::Key::F11), Some("F11"));
    }

    #[test]
    fn test_key_names_parse_as_bindings() {
        use crate::accel::Binding;
        for key in [egui::Key::Q, egui::Key::F5, egui::Key::Plus, egui::Key::Backspace] {
            let name = key_name(key).unwrap();
            let binding = Binding::parse(name).unwrap().unwrap();
            assert_eq!(binding.key.name(), name);
        }
    }

    #[test]
    fn test_modifiers() {
        let mods = modifiers(egui::Modifiers {
            ctrl: true,
            shift: true,
            ..Default::default()
        });
        assert_eq!(mods, Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(modifiers(egui::Modifiers::NONE), Modifiers::empty());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a much longer name", 10), "a much ...");
        assert_eq!(truncate_text("日本語のプリセット名", 6), "日本語...");
    }
}
