//! Key codes, modifier masks and the textual forms of a binding.
//!
//! Two textual forms exist: the accelerator string stored in key-binding
//! files (`<Primary><Shift>e`) and the human label shown in the tree
//! (`Shift+Ctrl+E`).

use std::fmt;

use bitflags::bitflags;

use crate::error::{PrefsError, Result};

bitflags! {
    /// Modifier mask of a binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// Accelerator-string tokens, in the order they are written out.
const MODIFIER_TOKENS: &[(Modifiers, &str, &str)] = &[
    (Modifiers::SHIFT, "<Shift>", "Shift+"),
    (Modifiers::CONTROL, "<Primary>", "Ctrl+"),
    (Modifiers::ALT, "<Alt>", "Alt+"),
    (Modifiers::SUPER, "<Super>", "Super+"),
];

/// A key name such as `e`, `F5`, `space` or `Page_Up`.
///
/// Single characters are always stored lower-case so that `E` and `e` name
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn new(name: &str) -> Self {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key(c.to_lowercase().collect()),
            _ => Key(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// True for keys that only ever act as modifiers.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self.0.as_str(),
            "Shift_L"
                | "Shift_R"
                | "Control_L"
                | "Control_R"
                | "Alt_L"
                | "Alt_R"
                | "Super_L"
                | "Super_R"
                | "Meta_L"
                | "Meta_R"
                | "ISO_Level3_Shift"
                | "Caps_Lock"
        )
    }

    /// Display name used in labels.
    pub fn label(&self) -> String {
        match self.0.as_str() {
            "space" => "Space".to_string(),
            "Return" => "Enter".to_string(),
            "BackSpace" => "Backspace".to_string(),
            "Page_Up" => "Page Up".to_string(),
            "Page_Down" => "Page Down".to_string(),
            "KP_Add" => "Num +".to_string(),
            "KP_Subtract" => "Num -".to_string(),
            "plus" => "+".to_string(),
            "minus" => "-".to_string(),
            "comma" => ",".to_string(),
            "period" => ".".to_string(),
            "slash" => "/".to_string(),
            name if name.chars().count() == 1 => name.to_uppercase(),
            name => name.replace('_', " "),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key plus modifier mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub key: Key,
    pub mods: Modifiers,
}

impl Binding {
    pub fn new(key: &str, mods: Modifiers) -> Self {
        Self {
            key: Key::new(key),
            mods,
        }
    }

    /// Parses an accelerator string. An empty string means "unbound".
    pub fn parse(accel: &str) -> Result<Option<Binding>> {
        let mut rest = accel.trim();
        if rest.is_empty() {
            return Ok(None);
        }

        let mut mods = Modifiers::empty();
        while rest.starts_with('<') {
            let end = rest
                .find('>')
                .ok_or_else(|| PrefsError::InvalidAccelerator(accel.to_string()))?;
            let token = &rest[1..end];
            mods |= match token.to_ascii_lowercase().as_str() {
                "shift" => Modifiers::SHIFT,
                "primary" | "control" | "ctrl" | "ctl" => Modifiers::CONTROL,
                "alt" | "mod1" => Modifiers::ALT,
                "super" | "meta" => Modifiers::SUPER,
                _ => return Err(PrefsError::InvalidAccelerator(accel.to_string())),
            };
            rest = &rest[end + 1..];
        }

        if rest.is_empty() {
            return Err(PrefsError::InvalidAccelerator(accel.to_string()));
        }
        Ok(Some(Binding::new(rest, mods)))
    }

    /// Accelerator string as written to key-binding files.
    pub fn to_accel_string(&self) -> String {
        let mut out = String::with_capacity(24);
        for (flag, token, _) in MODIFIER_TOKENS {
            if self.mods.contains(*flag) {
                out.push_str(token);
            }
        }
        out.push_str(self.key.name());
        out
    }

    /// Human readable label, e.g. `Shift+Ctrl+E`.
    pub fn label(&self) -> String {
        let mut out = String::with_capacity(24);
        for (flag, _, label) in MODIFIER_TOKENS {
            if self.mods.contains(*flag) {
                out.push_str(label);
            }
        }
        out.push_str(&self.key.label());
        out
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Label for an optional binding; unbound accelerators show an empty label.
pub fn binding_label(binding: Option<&Binding>) -> String {
    binding.map(Binding::label).unwrap_or_default()
}

/// A key press as delivered to the shortcuts tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(key: &str, mods: Modifiers) -> Self {
        Self {
            key: Key::new(key),
            mods,
        }
    }

    /// The binding this event proposes, with the key lower-cased.
    pub fn to_binding(&self) -> Binding {
        Binding::new(self.key.name(), self.mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_characters_are_lowercased() {
        assert_eq!(Key::new("E"), Key::new("e"));
        assert_eq!(Key::new("F5").name(), "F5");
    }

    #[test]
    fn test_parse_accelerator_string() {
        let binding = Binding::parse("<Primary><Shift>e").unwrap().unwrap();
        assert_eq!(binding.key.name(), "e");
        assert_eq!(binding.mods, Modifiers::CONTROL | Modifiers::SHIFT);

        assert_eq!(Binding::parse("").unwrap(), None);
        assert_eq!(Binding::parse("  ").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Binding::parse("<Hyper>q").is_err());
        assert!(Binding::parse("<Primary>").is_err());
        assert!(Binding::parse("<Primary").is_err());
    }

    #[test]
    fn test_accel_string_order_is_stable() {
        let binding = Binding::new("z", Modifiers::SUPER | Modifiers::SHIFT | Modifiers::CONTROL);
        assert_eq!(binding.to_accel_string(), "<Shift><Primary><Super>z");
        let parsed = Binding::parse(&binding.to_accel_string()).unwrap();
        assert_eq!(parsed, Some(binding));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Binding::new("e", Modifiers::CONTROL).label(), "Ctrl+E");
        assert_eq!(Binding::new("space", Modifiers::empty()).label(), "Space");
        assert_eq!(
            Binding::new("Page_Down", Modifiers::SHIFT | Modifiers::ALT).label(),
            "Shift+Alt+Page Down"
        );
        assert_eq!(binding_label(None), "");
    }

    #[test]
    fn test_modifier_keys() {
        assert!(Key::new("Shift_L").is_modifier());
        assert!(!Key::new("s").is_modifier());
    }
}
