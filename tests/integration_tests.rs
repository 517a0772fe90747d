//! Integration tests for the Lumen preferences dialog.
//!
//! Tests drive the library the way the dialog does and check that the
//! registry, the trees, the stores and the files on disk agree.

use lumen_prefs::accel::catalog::{default_registry, register_presets};
use lumen_prefs::accel::registry::{module_show_path, preset_path};
use lumen_prefs::accel::{AccelTree, Binding, KeyEvent, Modifiers, SearchWalker};
use lumen_prefs::config::keys;
use lumen_prefs::presets::{PresetRow, PresetStore, PresetTree, StaticModuleCatalog};
use lumen_prefs::{AppPaths, ConfigStore, KeyResponse, Language, PreferencesController};
use std::fs;
use tempfile::TempDir;

/// Returns application paths inside a fresh temporary directory.
fn test_paths(dir: &TempDir) -> AppPaths {
    AppPaths::new(dir.path().join("config"), dir.path().join("share"))
}

fn open(paths: &AppPaths) -> PreferencesController {
    PreferencesController::open(paths.clone()).expect("Failed to open preferences")
}

/// Tests configuration save and load cycle preserves data.
#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lumenrc.toml");

    let mut config = ConfigStore::load_or_create(&path).expect("Failed to create config");
    assert!(path.exists(), "defaults should be written on first start");
    config.set_string(keys::THEME, "lumen-light");
    config.set_bool(keys::PERFORMANCE, true);
    config.set_float(keys::FONT_SIZE, 14.5);
    config.set_int(keys::SCREEN_DPI_OVERWRITE, 120);
    config.save().expect("Failed to save config");

    let loaded = ConfigStore::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.get_string(keys::THEME), "lumen-light");
    assert!(loaded.get_bool(keys::PERFORMANCE));
    assert_eq!(loaded.get_float(keys::FONT_SIZE), 14.5);
    assert_eq!(loaded.get_int(keys::SCREEN_DPI_OVERWRITE), 120);
    assert!(loaded.is_default(keys::GUI_LANGUAGE));
}

/// Tests that out-of-range numbers are clamped to their bounds.
#[test]
fn test_config_bounds() {
    let mut config = ConfigStore::in_memory();
    config.set_float(keys::FONT_SIZE, 200.0);
    assert_eq!(config.get_float(keys::FONT_SIZE), 30.0);
    config.set_int(keys::DIALOG_WIDTH, 10);
    assert_eq!(config.get_int(keys::DIALOG_WIDTH), 400);
}

/// Tests that key-binding files survive a round trip and tolerate entries
/// from other versions.
#[test]
fn test_keybinding_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keyboardrc.toml");

    let mut registry = default_registry(Language::English);
    registry
        .set_binding("global/preferences", Some(Binding::new("comma", Modifiers::CONTROL)))
        .unwrap();
    registry.clear("global/quit").unwrap();
    registry.save_to_file(&path).expect("Failed to save key bindings");

    let mut loaded = default_registry(Language::English);
    let applied = loaded.load_from_file(&path).expect("Failed to load key bindings");
    assert_eq!(applied, loaded.len());
    assert_eq!(
        loaded.binding("global/preferences"),
        Some(&Binding::new("comma", Modifiers::CONTROL))
    );
    assert_eq!(loaded.binding("global/quit"), None);

    fs::write(
        &path,
        "[bindings]\n\"<Lumen>/global/retired action\" = \"<Control>k\"\n\
         \"<Lumen>/global/undo\" = \"<Hyper>z\"\n\
         \"<Lumen>/global/redo\" = \"<Control><Shift>z\"\n",
    )
    .unwrap();
    let applied = loaded.load_from_file(&path).expect("Failed to load key bindings");
    assert_eq!(applied, 1, "only the redo entry is usable");
    assert_eq!(
        loaded.binding("global/redo"),
        Some(&Binding::new("z", Modifiers::CONTROL | Modifiers::SHIFT))
    );
    assert_eq!(
        loaded.binding("global/undo"),
        Some(&Binding::new("z", Modifiers::CONTROL))
    );
}

/// Tests that every registered accelerator shows up as a leaf in every
/// interface language.
#[test]
fn test_tree_covers_registry_in_all_languages() {
    for &lang in Language::all() {
        let mut registry = default_registry(lang);
        register_presets(&mut registry, lang, [("exposure", "bright"), ("crop", "square")]);
        let tree = AccelTree::build(&registry);
        assert_eq!(tree.leaf_count(), registry.len(), "{lang:?}");
        for accel in registry.iter() {
            assert!(
                tree.leaf_for_path(accel.path.as_str()).is_some(),
                "{} missing in {lang:?}",
                accel.path
            );
        }
    }
}

/// Tests that presets sort ahead of the other actions of their module.
#[test]
fn test_preset_group_is_pinned() {
    let mut registry = default_registry(Language::English);
    register_presets(&mut registry, Language::English, [("exposure", "bright")]);
    let tree = AccelTree::build(&registry);

    let leaf = tree
        .leaf_for_path(&preset_path("exposure", "bright"))
        .expect("preset leaf");
    let module = tree.node(&leaf[..leaf.len() - 2]).expect("module node");
    let first = &module.children()[0];
    assert_eq!(first.key, "preset");
    assert!(first.pinned);
}

/// Tests that search cycles through every match and then starts over.
#[test]
fn test_search_cycles_through_matches() {
    let tree = AccelTree::build(&default_registry(Language::English));
    let mut walker = SearchWalker::new();

    let mut hits = Vec::new();
    while let Some(hit) = walker.search(&tree, "zoom") {
        assert!(!hits.contains(&hit), "each match is shown once per cycle");
        hits.push(hit);
    }
    assert_eq!(hits.len(), 7);
    assert_eq!(walker.search(&tree, "zoom").as_ref(), hits.first());
    assert_eq!(walker.search(&tree, "Zoom"), None, "upper case matches exactly");
}

/// Tests a remap over a conflict from key press to the file on disk.
#[test]
fn test_remap_over_conflict_is_persisted() {
    let dir = TempDir::new().unwrap();
    let paths = test_paths(&dir);
    let mut controller = open(&paths);

    let node = controller
        .accel_tree()
        .leaf_for_path("global/undo")
        .expect("undo leaf");
    controller.activate(node);
    let response = controller
        .handle_key(&KeyEvent::new("y", Modifiers::CONTROL))
        .expect("key press");
    assert!(matches!(response, KeyResponse::NeedsConfirmation(_)));
    let cleared = controller.resolve_conflict(true).expect("confirm");
    assert_eq!(cleared.len(), 1);

    let reopened = open(&paths);
    assert_eq!(
        reopened.registry().binding("global/undo"),
        Some(&Binding::new("y", Modifiers::CONTROL))
    );
    assert_eq!(reopened.registry().binding("global/redo"), None);
}

/// Tests that restoring defaults applies the shipped defaults file.
#[test]
fn test_restore_defaults_uses_shipped_file() {
    let dir = TempDir::new().unwrap();
    let paths = test_paths(&dir);
    fs::create_dir_all(&paths.data_dir).unwrap();
    fs::write(
        paths.default_keybinding_file(),
        "[bindings]\n\"<Lumen>/global/preferences\" = \"<Control>comma\"\n\
         \"<Lumen>/darkroom/modules/crop/show\" = \"c\"\n",
    )
    .unwrap();

    let mut controller = open(&paths);
    assert_eq!(
        controller.registry().binding("global/preferences"),
        Some(&Binding::new("comma", Modifiers::CONTROL)),
        "the shipped file is used until the user saves bindings"
    );

    let node = controller
        .accel_tree()
        .leaf_for_path("global/preferences")
        .unwrap();
    controller.select(node);
    controller
        .handle_key(&KeyEvent::new("BackSpace", Modifiers::empty()))
        .unwrap();
    assert_eq!(controller.registry().binding("global/preferences"), None);

    controller.restore_default_keybindings().unwrap();
    assert_eq!(
        controller.registry().binding("global/preferences"),
        Some(&Binding::new("comma", Modifiers::CONTROL))
    );
    assert_eq!(controller.registry().binding(&module_show_path("crop")), None);
}

/// Tests preset export from one database and import into another.
#[test]
fn test_preset_export_import() {
    let dir = TempDir::new().unwrap();
    let source = PresetStore::open(&dir.path().join("a.db")).unwrap();
    let mut bright = PresetRow::new("exposure", "bright");
    bright.op_params = vec![0, 0, 128, 63];
    bright.autoapply = true;
    bright.filter.iso_min = 100.0;
    bright.filter.iso_max = 800.0;
    source.insert(&bright).unwrap();
    let mut builtin = PresetRow::new("exposure", "builtin");
    builtin.write_protect = true;
    source.insert(&builtin).unwrap();

    // the export directory does not exist yet
    let out = dir.path().join("export");
    let written = source.export_all(&out).expect("export");
    assert_eq!(written, 1, "write-protected presets are not exported");

    let files: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    let target = PresetStore::open(&dir.path().join("b.db")).unwrap();
    assert_eq!(target.import_files(&files), 1);

    let rows = target.list().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].op_params, bright.op_params);

    let tree = PresetTree::build(&rows, &StaticModuleCatalog::new(Language::English));
    let entry = &tree.groups()[0].entries[0];
    assert!(entry.autoapply);
    assert_eq!(entry.columns.iso, "100 – 800");
}

/// Tests that imported presets get an accelerator.
#[test]
fn test_imported_presets_are_registered() {
    let dir = TempDir::new().unwrap();
    let paths = test_paths(&dir);
    let file = {
        let store = PresetStore::open(&dir.path().join("other.db")).unwrap();
        store.insert(&PresetRow::new("vignette", "subtle")).unwrap();
        let row = store.list().unwrap().remove(0);
        lumen_prefs::presets::file::save_preset(&row, dir.path()).unwrap()
    };

    let mut controller = open(&paths);
    assert!(controller.registry().get(&preset_path("vignette", "subtle")).is_none());
    let imported = controller.import_presets(&[file]).unwrap();
    assert_eq!(imported, 1);
    assert!(controller.registry().get(&preset_path("vignette", "subtle")).is_some());
    assert!(
        controller
            .accel_tree()
            .leaf_for_path(&preset_path("vignette", "subtle"))
            .is_some()
    );
    assert_eq!(controller.preset_tree().len(), 1);
}

/// Tests that the language choice is stored and read back on restart.
#[test]
fn test_language_choice_persists() {
    let dir = TempDir::new().unwrap();
    let paths = test_paths(&dir);

    let mut controller = open(&paths);
    controller.set_language(Some(Language::TraditionalChinese));
    assert!(controller.close());

    let reopened = open(&paths);
    assert_eq!(reopened.language(), Language::TraditionalChinese);
    assert_eq!(
        reopened.chosen_language(),
        Some(Language::TraditionalChinese)
    );
    assert!(!reopened.restart_required());
}
