//! The built-in accelerator catalogue.

use crate::accel::key::{Binding, Modifiers};
use crate::accel::registry::{AccelRegistry, ViewSet};
use crate::i18n::{Language, accel_segment, module_name};

const NONE: Modifiers = Modifiers::empty();
const CTRL: Modifiers = Modifiers::CONTROL;
const CTRL_SHIFT: Modifiers = Modifiers::CONTROL.union(Modifiers::SHIFT);
const ALT: Modifiers = Modifiers::ALT;

/// `(action, key, modifiers)`; an empty key registers the action unbound.
const GLOBAL: &[(&str, &str, Modifiers)] = &[
    ("quit", "q", CTRL),
    ("preferences", "", NONE),
    ("fullscreen", "F11", NONE),
    ("undo", "z", CTRL),
    ("redo", "y", CTRL),
    ("switch views/lighttable", "l", NONE),
    ("switch views/darkroom", "d", NONE),
    ("switch views/map", "m", NONE),
    ("switch views/print", "p", NONE),
    ("switch views/tethering", "t", NONE),
    ("switch views/slideshow", "s", NONE),
];

/// `(view, action, key, modifiers)`
const VIEWS: &[(&str, &str, &str, Modifiers)] = &[
    ("lighttable", "select all", "a", CTRL),
    ("lighttable", "select none", "a", CTRL_SHIFT),
    ("lighttable", "zoom in", "plus", NONE),
    ("lighttable", "zoom out", "minus", NONE),
    ("lighttable", "preview", "w", NONE),
    ("darkroom", "zoom close-up", "1", ALT),
    ("darkroom", "zoom fill", "2", ALT),
    ("darkroom", "zoom fit", "3", ALT),
    ("map", "zoom in", "plus", NONE),
    ("map", "zoom out", "minus", NONE),
    ("print", "print", "p", CTRL),
    ("tethering", "capture image", "space", NONE),
    ("slideshow", "start and stop", "space", NONE),
];

/// Processing modules known to the catalogue.
pub const PROCESSING_MODULES: &[&str] = &[
    "exposure",
    "temperature",
    "crop",
    "sharpen",
    "denoiseprofile",
    "colorbalancergb",
    "lens",
    "flip",
    "vignette",
    "colorin",
];

/// `(op, action, local, key, modifiers)`; actions use "`" between levels.
const IOPS: &[(&str, &str, bool, &str, Modifiers)] = &[
    ("exposure", "reset", true, "", NONE),
    ("exposure", "enable", true, "", NONE),
    ("exposure", "blend`opacity", true, "", NONE),
    ("temperature", "reset", true, "", NONE),
    ("temperature", "enable", true, "", NONE),
    ("crop", "commit", true, "Return", NONE),
    ("crop", "reset", true, "", NONE),
    ("sharpen", "enable", true, "", NONE),
    ("flip", "rotate 90 degrees CW", false, "r", CTRL),
    ("flip", "rotate 90 degrees CCW", false, "r", CTRL_SHIFT),
    ("vignette", "enable", true, "", NONE),
];

/// `(lib, action, key, modifiers, views)`
const LIBS: &[(&str, &str, &str, Modifiers, ViewSet)] = &[
    ("copy history", "copy", "c", CTRL, LIGHTTABLE_DARKROOM),
    ("copy history", "paste", "v", CTRL, LIGHTTABLE_DARKROOM),
    ("copy history", "selective copy", "c", CTRL_SHIFT, LIGHTTABLE_DARKROOM),
    ("copy history", "selective paste", "v", CTRL_SHIFT, LIGHTTABLE_DARKROOM),
    ("tagging", "attach", "t", CTRL, LIGHTTABLE_DARKROOM),
    ("export", "export", "e", CTRL, LIGHTTABLE_DARKROOM),
    ("image", "remove from library", "Delete", NONE, ViewSet::LIGHTTABLE),
    ("snapshots", "take snapshot", "", NONE, ViewSet::DARKROOM),
];

const LIGHTTABLE_DARKROOM: ViewSet = ViewSet::LIGHTTABLE.union(ViewSet::DARKROOM);

fn binding(key: &str, mods: Modifiers) -> Option<Binding> {
    (!key.is_empty()).then(|| Binding::new(key, mods))
}

/// Localizes each `/`-separated part.
fn localize(lang: Language, path: &str) -> String {
    path.split('/')
        .map(|part| accel_segment(lang, part))
        .collect::<Vec<_>>()
        .join("/")
}

/// Registers the built-in accelerators. Entries that fail to parse are
/// logged by the registry and left out.
pub fn register_defaults(registry: &mut AccelRegistry, lang: Language) {
    let global = accel_segment(lang, "global");
    let views = accel_segment(lang, "views");
    let iop_group = accel_segment(lang, "image operations");
    let lib_group = accel_segment(lang, "modules");
    let darkroom = accel_segment(lang, "darkroom");
    let show = accel_segment(lang, "show");

    for &(action, key, mods) in GLOBAL {
        let _ = registry.register_global(action, &localize(lang, action), &global, binding(key, mods));
    }

    for &(view, action, key, mods) in VIEWS {
        let _ = registry.register_view(
            view,
            &accel_segment(lang, view),
            action,
            &localize(lang, action),
            &views,
            binding(key, mods),
        );
    }

    for &(op, action, local, key, mods) in IOPS {
        let action_label: Vec<String> = action.split('`').map(|p| accel_segment(lang, p)).collect();
        let _ = registry.register_iop(
            op,
            module_name(lang, op),
            &iop_group,
            local,
            action,
            &action_label.join("`"),
            binding(key, mods),
        );
    }

    for &op in PROCESSING_MODULES {
        let _ = registry.register_module_show(op, module_name(lang, op), &darkroom, &iop_group, &show);
    }

    for &(lib, action, key, mods, views) in LIBS {
        let _ = registry.register_lib(
            lib,
            &accel_segment(lang, lib),
            &lib_group,
            action,
            &localize(lang, action),
            binding(key, mods),
            views,
        );
    }

    tracing::debug!(count = registry.len(), "registered built-in accelerators");
}

/// Registers the "apply preset" accelerator of every `(operation, name)`.
pub fn register_presets<'a, I>(registry: &mut AccelRegistry, lang: Language, presets: I)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let iop_group = accel_segment(lang, "image operations");
    let preset = accel_segment(lang, "preset");
    for (op, name) in presets {
        let _ = registry.register_iop(
            op,
            module_name(lang, op),
            &iop_group,
            false,
            &format!("preset`{name}"),
            &format!("{preset}`{name}"),
            None,
        );
    }
}

/// A registry holding the built-in catalogue.
pub fn default_registry(lang: Language) -> AccelRegistry {
    let mut registry = AccelRegistry::new();
    register_defaults(&mut registry, lang);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::remap::find_conflict;
    use crate::accel::tree::AccelTree;

    #[test]
    fn test_catalogue_registers_everything() {
        let registry = default_registry(Language::English);
        let expected = GLOBAL.len() + VIEWS.len() + IOPS.len() + PROCESSING_MODULES.len() + LIBS.len();
        assert_eq!(registry.len(), expected);
        assert!(registry.get("global/quit").is_some());
        assert!(registry.get("darkroom/modules/exposure/show").is_some());
        assert!(registry.get("image operations/blending/opacity").is_some());
    }

    #[test]
    fn test_defaults_do_not_conflict() {
        let registry = default_registry(Language::English);
        for accel in registry.iter() {
            if let Some(binding) = &accel.binding {
                assert!(
                    find_conflict(&registry, accel.path.as_str(), binding).is_none(),
                    "{} collides",
                    accel.path
                );
            }
        }
    }

    #[test]
    fn test_localized_catalogue_builds() {
        for lang in Language::all() {
            let registry = default_registry(*lang);
            let tree = AccelTree::build(&registry);
            assert_eq!(tree.leaf_count(), registry.len(), "{lang:?}");
        }
    }

    #[test]
    fn test_preset_accelerators_are_pinned() {
        let mut registry = default_registry(Language::English);
        register_presets(&mut registry, Language::English, [("exposure", "+1/2 EV")]);
        let accel = registry.get("image operations/exposure/preset/+1/2 EV").unwrap();
        assert!(accel.path.segments()[2].pinned);
        assert_eq!(accel.path.segments()[3].localized, "+1/2 EV");
    }
}
