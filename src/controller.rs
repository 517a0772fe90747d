//! Dialog state and every operation the preferences dialog performs.
//!
//! The controller owns the remap marker, the search cycle and both trees.
//! The GUI only renders what it exposes and forwards user input to it, so
//! the whole dialog can be driven without a window.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::accel::catalog::{register_defaults, register_presets};
use crate::accel::key::{KeyEvent, binding_label};
use crate::accel::registry::{AccelRegistry, preset_path};
use crate::accel::remap::{KeyOutcome, PendingRemap, Remapper, apply_with_conflict_clearing};
use crate::accel::search::SearchWalker;
use crate::accel::tree::{AccelTree, NodePath};
use crate::config::{AppPaths, ConfigStore, clamp_dpi, keys};
use crate::error::{PrefsError, Result};
use crate::i18n::{CachedTranslations, Language};
use crate::presets::{ModuleCatalog, PresetRow, PresetStore, PresetTree, StaticModuleCatalog};
use crate::theme::{self, Theme};

/// Key that clears the selected binding.
const CLEAR_KEY: &str = "BackSpace";

/// What a key press on the shortcuts tab did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    /// The binding was applied and saved; `cleared` lists accelerators that
    /// lost a colliding binding.
    Applied { path: String, cleared: Vec<String> },
    /// The binding collides; [`PreferencesController::resolve_conflict`]
    /// must be called with the user's answer.
    NeedsConfirmation(PendingRemap),
    /// The selected binding was removed.
    Cleared(String),
}

pub struct PreferencesController {
    paths: AppPaths,
    config: ConfigStore,
    registry: AccelRegistry,
    presets: PresetStore,
    catalog: Box<dyn ModuleCatalog>,
    language: Language,
    remap_prompt: String,
    remapper: Remapper,
    pending: Option<PendingRemap>,
    search: SearchWalker,
    accel_tree: AccelTree,
    preset_tree: PresetTree,
    selected: Option<NodePath>,
    expanded: HashSet<NodePath>,
    restart_required: bool,
}

impl PreferencesController {
    /// Opens the dialog on the application's files.
    pub fn open(paths: AppPaths) -> Result<Self> {
        let mut config = ConfigStore::load_or_create(paths.config_file())?;
        config.normalize_font_size();
        let language = Language::resolve(&config.get_string(keys::GUI_LANGUAGE));
        let presets = PresetStore::open(&paths.presets_database())?;

        let mut registry = AccelRegistry::new();
        register_defaults(&mut registry, language);
        let rows = presets.list()?;
        register_presets(
            &mut registry,
            language,
            rows.iter().map(|r| (r.operation.as_str(), r.name.as_str())),
        );
        let user_file = paths.keybinding_file();
        let defaults_file = paths.default_keybinding_file();
        let bindings_file = if user_file.exists() {
            Some(user_file)
        } else {
            defaults_file.exists().then_some(defaults_file)
        };
        if let Some(file) = bindings_file
            && let Err(e) = registry.load_from_file(&file)
        {
            tracing::warn!(error = %e, "keeping built-in key bindings");
        }

        Ok(Self::new(
            paths,
            config,
            registry,
            presets,
            Box::new(StaticModuleCatalog::new(language)),
            language,
        ))
    }

    pub fn new(
        paths: AppPaths,
        config: ConfigStore,
        registry: AccelRegistry,
        presets: PresetStore,
        catalog: Box<dyn ModuleCatalog>,
        language: Language,
    ) -> Self {
        let accel_tree = AccelTree::build(&registry);
        let preset_tree = match presets.list() {
            Ok(rows) => PresetTree::build(&rows, catalog.as_ref()),
            Err(e) => {
                tracing::error!(error = %e, "failed to read presets");
                PresetTree::default()
            }
        };
        Self {
            paths,
            config,
            registry,
            presets,
            catalog,
            language,
            remap_prompt: CachedTranslations::new(language).remap_prompt().to_string(),
            remapper: Remapper::new(),
            pending: None,
            search: SearchWalker::new(),
            accel_tree,
            preset_tree,
            selected: None,
            expanded: HashSet::new(),
            restart_required: false,
        }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn registry(&self) -> &AccelRegistry {
        &self.registry
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn restart_required(&self) -> bool {
        self.restart_required
    }

    // Shortcuts tab

    pub fn accel_tree(&self) -> &AccelTree {
        &self.accel_tree
    }

    pub fn selected(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    pub fn is_expanded(&self, node: &[usize]) -> bool {
        self.expanded.contains(&NodePath::from_slice(node))
    }

    pub fn set_expanded(&mut self, node: &[usize], expanded: bool) {
        let node = NodePath::from_slice(node);
        if expanded {
            self.expanded.insert(node);
        } else {
            self.expanded.remove(&node);
        }
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.remapper.is_awaiting()
    }

    pub fn pending_remap(&self) -> Option<&PendingRemap> {
        self.pending.as_ref()
    }

    /// Moves the selection. A remap waiting on another node is cancelled and
    /// that node's label restored.
    pub fn select(&mut self, node: NodePath) {
        if self.remapper.awaiting_node().is_some_and(|n| *n != node)
            && let Some((path, old)) = self.remapper.cancel()
        {
            tracing::debug!(path = %path, "remap cancelled");
            let label = binding_label(self.registry.binding(&path));
            self.accel_tree.set_leaf_label(&old, label);
        }
        self.selected = Some(node);
    }

    /// Double-click or Enter: leaves start a remap, branches fold.
    pub fn activate(&mut self, node: NodePath) {
        self.select(node.clone());
        let Some(accel_node) = self.accel_tree.node(&node) else {
            return;
        };
        if accel_node.is_branch() {
            let expanded = self.is_expanded(&node);
            self.set_expanded(&node, !expanded);
            return;
        }
        let Some(path) = self.accel_tree.canonical_path(&node) else {
            return;
        };
        self.accel_tree
            .set_leaf_label(&node, self.remap_prompt.clone());
        self.remapper.begin(path, node);
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> Result<KeyResponse> {
        if self.pending.is_some() {
            return Ok(KeyResponse::Ignored);
        }
        if self.remapper.is_awaiting() {
            return match self.remapper.handle_key(&self.registry, event) {
                KeyOutcome::Ignored => Ok(KeyResponse::Ignored),
                KeyOutcome::Apply { path, binding, .. } => {
                    let target = path.clone();
                    let cleared = self.commit_bindings(move |registry| {
                        registry.set_binding(&target, Some(binding))?;
                        Ok(Vec::new())
                    })?;
                    tracing::info!(path = %path, "shortcut remapped");
                    Ok(KeyResponse::Applied { path, cleared })
                }
                KeyOutcome::Confirm(pending) => {
                    self.pending = Some(pending.clone());
                    Ok(KeyResponse::NeedsConfirmation(pending))
                }
            };
        }
        if event.key.name() == CLEAR_KEY && event.mods.is_empty() {
            return match self.clear_selected()? {
                Some(path) => Ok(KeyResponse::Cleared(path)),
                None => Ok(KeyResponse::Ignored),
            };
        }
        Ok(KeyResponse::Ignored)
    }

    /// Answers a pending conflict. Accepting binds the accelerator and
    /// clears every colliding one; refusing changes nothing.
    pub fn resolve_conflict(&mut self, accept: bool) -> Result<Vec<String>> {
        let Some(pending) = self.pending.take() else {
            return Ok(Vec::new());
        };
        if !accept {
            self.accel_tree.refresh_labels(&self.registry);
            return Ok(Vec::new());
        }
        let PendingRemap { path, binding, .. } = pending;
        let target = path.clone();
        let cleared = self.commit_bindings(move |registry| {
            apply_with_conflict_clearing(registry, &target, binding)
        })?;
        tracing::info!(path = %path, cleared = cleared.len(), "shortcut remapped over conflict");
        Ok(cleared)
    }

    /// Unbinds the selected leaf. Returns its path, or `None` when no leaf
    /// is selected.
    pub fn clear_selected(&mut self) -> Result<Option<String>> {
        let Some(node) = &self.selected else {
            return Ok(None);
        };
        if self.accel_tree.node(node).is_none_or(|n| n.is_branch()) {
            return Ok(None);
        }
        let Some(path) = self.accel_tree.canonical_path(node) else {
            return Ok(None);
        };
        let target = path.clone();
        self.commit_bindings(move |registry| registry.clear(&target))?;
        Ok(Some(path))
    }

    /// Selects the next match of `query`, collapsing everything except its
    /// ancestors.
    pub fn search(&mut self, query: &str) -> Option<NodePath> {
        let hit = self.search.search(&self.accel_tree, query)?;
        self.expanded.clear();
        self.expanded.extend(AccelTree::ancestors(&hit));
        self.select(hit.clone());
        Some(hit)
    }

    pub fn import_keybindings(&mut self, file: &Path) -> Result<usize> {
        let source = file.to_path_buf();
        let applied = self.commit_bindings(move |registry| registry.load_from_file(&source))?;
        self.remember_dir(keys::IMPORT_PATH, file);
        Ok(applied)
    }

    pub fn export_keybindings(&mut self, file: &Path) -> Result<()> {
        self.registry.save_to_file(file)?;
        self.remember_dir(keys::EXPORT_PATH, file);
        Ok(())
    }

    /// Resets every binding to the shipped defaults and clears the
    /// per-module "show" shortcuts.
    pub fn restore_default_keybindings(&mut self) -> Result<()> {
        let defaults = self.paths.default_keybinding_file();
        self.commit_bindings(move |registry| registry.restore_defaults(Some(&defaults)))?;
        tracing::info!("default key bindings restored");
        Ok(())
    }

    /// Applies a binding mutation and saves the key-binding file. On any
    /// failure the previous bindings are put back.
    fn commit_bindings<R, F>(&mut self, mutate: F) -> Result<R>
    where
        F: FnOnce(&mut AccelRegistry) -> Result<R>,
    {
        self.cancel_remap();
        let snapshot = self.registry.snapshot();
        let file = self.paths.keybinding_file();
        let result = mutate(&mut self.registry).and_then(|r| {
            self.registry.save_to_file(&file)?;
            Ok(r)
        });
        if let Err(e) = &result {
            tracing::warn!(error = %e, "key binding change rolled back");
            self.registry.restore(snapshot);
        }
        self.accel_tree.refresh_labels(&self.registry);
        result
    }

    /// Abandons a remap in progress and restores its label.
    pub fn cancel_remap(&mut self) {
        if let Some((path, node)) = self.remapper.cancel() {
            let label = binding_label(self.registry.binding(&path));
            self.accel_tree.set_leaf_label(&node, label);
        }
    }

    fn rebuild_accel_tree(&mut self) {
        self.cancel_remap();
        self.accel_tree = AccelTree::build(&self.registry);
        self.selected = None;
        self.expanded.clear();
        self.search.reset();
    }

    // Presets tab

    pub fn preset_tree(&self) -> &PresetTree {
        &self.preset_tree
    }

    pub fn refresh_presets(&mut self) -> Result<()> {
        let rows = self.presets.list()?;
        self.preset_tree = PresetTree::build(&rows, self.catalog.as_ref());
        Ok(())
    }

    pub fn preset(&self, rowid: i64) -> Result<PresetRow> {
        self.presets.get(rowid)
    }

    /// Deletes a writable preset together with its "apply" shortcut.
    pub fn delete_preset(&mut self, rowid: i64) -> Result<PresetRow> {
        let row = self.presets.get(rowid)?;
        if row.write_protect {
            return Err(PrefsError::WriteProtected(rowid));
        }
        let accel = preset_path(&row.operation, &row.name);
        if self.registry.get(&accel).is_some() {
            self.commit_bindings(move |registry| registry.clear(&accel))?;
        }
        let deleted = self.presets.delete(rowid)?;
        self.refresh_presets()?;
        Ok(deleted)
    }

    pub fn update_preset(&mut self, row: &PresetRow) -> Result<()> {
        self.presets.update(row)?;
        self.refresh_presets()
    }

    /// Imports preset files, registering shortcuts for the new presets.
    pub fn import_presets(&mut self, files: &[PathBuf]) -> Result<usize> {
        let imported = self.presets.import_files(files);
        let rows = self.presets.list()?;
        let before = self.registry.len();
        register_presets(
            &mut self.registry,
            self.language,
            rows.iter().map(|r| (r.operation.as_str(), r.name.as_str())),
        );
        if self.registry.len() != before {
            self.rebuild_accel_tree();
        }
        self.preset_tree = PresetTree::build(&rows, self.catalog.as_ref());
        if let Some(first) = files.first() {
            self.remember_dir(keys::IMPORT_PATH, first);
        }
        Ok(imported)
    }

    pub fn export_presets(&mut self, dir: &Path) -> Result<usize> {
        let written = self.presets.export_all(dir)?;
        self.config
            .set_string(keys::EXPORT_PATH, &dir.to_string_lossy());
        self.save_config();
        Ok(written)
    }

    // General tab

    /// Stores the interface language; `None` follows the system.
    pub fn set_language(&mut self, language: Option<Language>) {
        let code = language.map(|l| l.code()).unwrap_or_default();
        if self.config.get_string(keys::GUI_LANGUAGE) != code {
            self.config.set_string(keys::GUI_LANGUAGE, code);
            self.restart_required = true;
            self.save_config();
        }
    }

    /// Language picked in the dialog; `None` when following the system.
    pub fn chosen_language(&self) -> Option<Language> {
        let code = self.config.get_string(keys::GUI_LANGUAGE);
        (!code.is_empty()).then(|| Language::resolve(&code))
    }

    pub fn themes(&self) -> Vec<String> {
        theme::discover_themes(&self.paths.theme_dirs())
    }

    pub fn set_theme(&mut self, name: &str) -> Theme {
        self.config.set_string(keys::THEME, name);
        self.save_config();
        self.current_theme()
    }

    /// Selected theme with the user CSS applied when enabled.
    pub fn current_theme(&self) -> Theme {
        let css = self
            .config
            .get_bool(keys::USER_CSS)
            .then(|| self.user_css());
        Theme::resolve(
            &self.config.get_string(keys::THEME),
            &self.paths.theme_dirs(),
            css.as_deref(),
        )
    }

    pub fn user_css(&self) -> String {
        theme::load_user_css(&self.paths.user_css_file())
    }

    /// Saves the CSS tweaks and turns them on.
    pub fn save_user_css(&mut self, css: &str) -> Result<Theme> {
        theme::save_user_css(&self.paths.user_css_file(), css)?;
        self.config.set_bool(keys::USER_CSS, true);
        self.save_config();
        Ok(self.current_theme())
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.config.set_bool(key, value);
        self.save_config();
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.config.set_float(key, value);
        self.save_config();
    }

    pub fn set_dpi(&mut self, dpi: i64) {
        let dpi = clamp_dpi(dpi);
        if self.config.get_int(keys::SCREEN_DPI_OVERWRITE) != dpi {
            self.config.set_int(keys::SCREEN_DPI_OVERWRITE, dpi);
            self.restart_required = true;
            self.save_config();
        }
    }

    /// Restores a preference to its default.
    pub fn reset_pref(&mut self, key: &str) {
        if self.config.is_default(key) || !self.config.reset(key) {
            return;
        }
        if key == keys::GUI_LANGUAGE || key == keys::SCREEN_DPI_OVERWRITE {
            self.restart_required = true;
        }
        self.save_config();
    }

    pub fn dialog_size(&self) -> (f32, f32) {
        (
            self.config.get_int(keys::DIALOG_WIDTH) as f32,
            self.config.get_int(keys::DIALOG_HEIGHT) as f32,
        )
    }

    /// Remembers a new dialog size; returns whether it changed.
    pub fn remember_dialog_size(&mut self, width: f32, height: f32) -> bool {
        let (w, h) = (width.round() as i64, height.round() as i64);
        if (w as f32, h as f32) == self.dialog_size() {
            return false;
        }
        self.config.set_int(keys::DIALOG_WIDTH, w);
        self.config.set_int(keys::DIALOG_HEIGHT, h);
        true
    }

    /// Directory a file chooser should start in.
    pub fn last_dir(&self, key: &str) -> Option<PathBuf> {
        let dir = self.config.get_string(key);
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }

    fn remember_dir(&mut self, key: &str, file: &Path) {
        let dir = if file.is_dir() { Some(file) } else { file.parent() };
        if let Some(dir) = dir {
            self.config.set_string(key, &dir.to_string_lossy());
            self.save_config();
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "failed to save configuration");
        }
    }

    /// Drops transient state and writes the configuration. Returns whether
    /// a restart is needed for the changes to apply.
    pub fn close(&mut self) -> bool {
        self.pending = None;
        self.cancel_remap();
        self.save_config();
        self.restart_required
    }
}
