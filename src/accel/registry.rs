//! The accelerator registry: every shortcut the application knows about,
//! its current binding and its persistence to the key-binding file.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::accel::key::Binding;
use crate::accel::path::{AccelPath, ESCAPE, full_path};
use crate::error::{PrefsError, Result};

bitflags! {
    /// Views in which an accelerator is active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewSet: u8 {
        const DARKROOM = 1;
        const LIGHTTABLE = 1 << 1;
        const TETHERING = 1 << 2;
        const MAP = 1 << 3;
        const PRINT = 1 << 4;
        const SLIDESHOW = 1 << 5;
    }
}

impl ViewSet {
    /// Scope of global accelerators.
    pub fn global() -> Self {
        Self::all()
    }

    pub fn from_view_name(name: &str) -> Option<Self> {
        match name {
            "darkroom" => Some(Self::DARKROOM),
            "lighttable" => Some(Self::LIGHTTABLE),
            "tethering" => Some(Self::TETHERING),
            "map" => Some(Self::MAP),
            "print" => Some(Self::PRINT),
            "slideshow" => Some(Self::SLIDESHOW),
            _ => None,
        }
    }
}

/// A registered accelerator.
#[derive(Debug, Clone)]
pub struct Accelerator {
    pub path: AccelPath,
    pub binding: Option<Binding>,
    pub default_binding: Option<Binding>,
    /// Owning module (operation or view name); empty for global ones.
    pub module: String,
    /// Scoped to one module instance rather than global.
    pub local: bool,
    pub views: ViewSet,
}

/// Bindings of every accelerator, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSnapshot(Vec<Option<Binding>>);

#[derive(Debug, Default, Serialize, Deserialize)]
struct KeybindingFile {
    #[serde(default)]
    bindings: BTreeMap<String, String>,
}

const KEYBINDING_FILE_HEADER: &str = "# Lumen key bindings\n\
# Each entry maps an accelerator path to an accelerator string such as\n\
# \"<Primary><Shift>e\". An empty string leaves the accelerator unbound.\n\n";

/// Ordered collection of accelerators with lookup by canonical path.
#[derive(Debug, Default)]
pub struct AccelRegistry {
    accels: Vec<Accelerator>,
    index: HashMap<String, usize>,
    processing_modules: Vec<String>,
}

impl AccelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an accelerator. A path registered twice keeps its first entry.
    pub fn register(&mut self, accel: Accelerator) {
        let key = accel.path.as_str().to_string();
        if self.index.contains_key(&key) {
            tracing::debug!(path = %key, "accelerator already registered");
            return;
        }
        self.index.insert(key, self.accels.len());
        self.accels.push(accel);
    }

    /// Parses and registers an accelerator. Entries whose translation does
    /// not segment like the canonical path are logged and skipped.
    pub fn register_path(
        &mut self,
        canonical: &str,
        localized: &str,
        binding: Option<Binding>,
        module: &str,
        local: bool,
        views: ViewSet,
    ) -> Result<()> {
        let path = AccelPath::parse(canonical, localized).inspect_err(|e| {
            tracing::warn!(error = %e, "skipping accelerator");
        })?;
        self.register(Accelerator {
            path,
            default_binding: binding.clone(),
            binding,
            module: module.to_string(),
            local,
            views,
        });
        Ok(())
    }

    pub fn register_global(
        &mut self,
        action: &str,
        action_label: &str,
        group_label: &str,
        binding: Option<Binding>,
    ) -> Result<()> {
        self.register_path(
            &format!("global/{action}"),
            &format!("{group_label}/{action_label}"),
            binding,
            "",
            false,
            ViewSet::global(),
        )
    }

    pub fn register_view(
        &mut self,
        view: &str,
        view_label: &str,
        action: &str,
        action_label: &str,
        group_label: &str,
        binding: Option<Binding>,
    ) -> Result<()> {
        let views = ViewSet::from_view_name(view).unwrap_or_else(ViewSet::global);
        self.register_path(
            &format!("views/{view}/{action}"),
            &format!("{group_label}/{view_label}/{action_label}"),
            binding,
            view,
            false,
            views,
        )
    }

    /// Registers an action of a processing module.
    ///
    /// `action` and `action_label` are "`"-separated parts. A leading
    /// `preset` part becomes the pinned preset group; a leading `blend` part
    /// moves the action under the blending group.
    #[allow(clippy::too_many_arguments)]
    pub fn register_iop(
        &mut self,
        op: &str,
        op_label: &str,
        group_label: &str,
        local: bool,
        action: &str,
        action_label: &str,
        binding: Option<Binding>,
    ) -> Result<()> {
        if !self.processing_modules.iter().any(|m| m == op) {
            self.processing_modules.push(op.to_string());
        }

        let mut module = op.to_string();
        let mut module_label = op_label.replace('/', "-");
        let mut parts: Vec<&str> = action.split(ESCAPE).filter(|p| !p.is_empty()).collect();
        let mut labels: Vec<String> = action_label
            .split(ESCAPE)
            .filter(|p| !p.is_empty())
            .map(|p| p.replace('/', &ESCAPE.to_string()))
            .collect();

        if parts.first() == Some(&"blend") {
            module = "blending".to_string();
            module_label = "blending ".to_string();
            parts.remove(0);
            if !labels.is_empty() {
                labels.remove(0);
            }
        }
        if parts.first() == Some(&"preset")
            && let Some(first) = labels.first_mut()
        {
            first.push(' ');
        }

        let (canonical, localized) = if parts.is_empty() {
            (
                format!("image operations/{module}"),
                format!("{group_label}/{module_label}"),
            )
        } else {
            (
                format!("image operations/{module}/{}", parts.join("/")),
                format!("{group_label}/{module_label}/{}", labels.join("/")),
            )
        };
        self.register_path(&canonical, &localized, binding, op, local, ViewSet::DARKROOM)
    }

    /// Registers an action of a utility module.
    pub fn register_lib(
        &mut self,
        lib: &str,
        lib_label: &str,
        group_label: &str,
        action: &str,
        action_label: &str,
        binding: Option<Binding>,
        views: ViewSet,
    ) -> Result<()> {
        self.register_path(
            &format!("modules/{lib}/{action}"),
            &format!("{group_label}/{lib_label}/{action_label}"),
            binding,
            lib,
            false,
            views,
        )
    }

    /// Registers the darkroom shortcut that focuses a processing module.
    pub fn register_module_show(
        &mut self,
        op: &str,
        op_label: &str,
        darkroom_label: &str,
        modules_label: &str,
        show_label: &str,
    ) -> Result<()> {
        self.register_path(
            &module_show_path(op),
            &format!(
                "{darkroom_label}/{modules_label}/{}/{show_label}",
                op_label.replace('/', "-")
            ),
            None,
            op,
            false,
            ViewSet::DARKROOM,
        )
    }

    pub fn len(&self) -> usize {
        self.accels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accels.is_empty()
    }

    /// Accelerators in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Accelerator> {
        self.accels.iter()
    }

    /// Operations registered through [`Self::register_iop`].
    pub fn processing_modules(&self) -> &[String] {
        &self.processing_modules
    }

    /// Index of an accelerator; accepts paths with or without the prefix.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.index.get(&full_path(path)).copied()
    }

    pub fn get(&self, path: &str) -> Option<&Accelerator> {
        self.position(path).map(|i| &self.accels[i])
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<&Accelerator> {
        self.accels.get(index)
    }

    pub fn binding(&self, path: &str) -> Option<&Binding> {
        self.get(path).and_then(|a| a.binding.as_ref())
    }

    pub fn set_binding(&mut self, path: &str, binding: Option<Binding>) -> Result<()> {
        let index = self
            .position(path)
            .ok_or_else(|| PrefsError::UnknownAccelerator(path.to_string()))?;
        self.accels[index].binding = binding;
        Ok(())
    }

    pub(crate) fn set_binding_at(&mut self, index: usize, binding: Option<Binding>) {
        if let Some(accel) = self.accels.get_mut(index) {
            accel.binding = binding;
        }
    }

    pub fn clear(&mut self, path: &str) -> Result<()> {
        self.set_binding(path, None)
    }

    pub fn snapshot(&self) -> BindingSnapshot {
        BindingSnapshot(self.accels.iter().map(|a| a.binding.clone()).collect())
    }

    pub fn restore(&mut self, snapshot: BindingSnapshot) {
        for (accel, binding) in self.accels.iter_mut().zip(snapshot.0) {
            accel.binding = binding;
        }
    }

    /// Writes every binding to a key-binding file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = KeybindingFile {
            bindings: self
                .accels
                .iter()
                .map(|a| {
                    let accel = a.binding.as_ref().map(Binding::to_accel_string);
                    (a.path.as_str().to_string(), accel.unwrap_or_default())
                })
                .collect(),
        };
        let mut content = String::from(KEYBINDING_FILE_HEADER);
        content.push_str(&toml::to_string(&file)?);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| PrefsError::io("create", parent, e))?;
        }
        fs::write(path, content).map_err(|e| PrefsError::io("write", path, e))?;
        tracing::debug!(path = %path.display(), count = self.accels.len(), "saved key bindings");
        Ok(())
    }

    /// Applies a key-binding file. Unknown paths and malformed entries are
    /// skipped; returns how many bindings were applied.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PrefsError::io("read", path, e))?;
        let file: KeybindingFile = toml::from_str(&content).map_err(|source| PrefsError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut applied = 0;
        for (accel_path, accel) in &file.bindings {
            let Some(index) = self.position(accel_path) else {
                tracing::debug!(path = %accel_path, "ignoring unknown accelerator");
                continue;
            };
            match Binding::parse(accel) {
                Ok(binding) => {
                    self.accels[index].binding = binding;
                    applied += 1;
                }
                Err(e) => tracing::warn!(path = %accel_path, error = %e, "skipping binding"),
            }
        }
        tracing::info!(path = %path.display(), applied, "loaded key bindings");
        Ok(applied)
    }

    /// Resets every binding to its registered default, overlays the defaults
    /// file when present and clears the per-module "show" shortcuts.
    pub fn restore_defaults(&mut self, defaults_file: Option<&Path>) -> Result<()> {
        for accel in &mut self.accels {
            accel.binding = accel.default_binding.clone();
        }
        if let Some(file) = defaults_file
            && file.exists()
        {
            self.load_from_file(file)?;
        }
        let shows: Vec<String> = self
            .processing_modules
            .iter()
            .map(|op| module_show_path(op))
            .collect();
        for show in shows {
            if let Some(index) = self.position(&show) {
                self.accels[index].binding = None;
            }
        }
        Ok(())
    }
}

/// Canonical path of the shortcut that focuses a processing module.
pub fn module_show_path(op: &str) -> String {
    full_path(&format!("darkroom/modules/{op}/show"))
}

/// Canonical path of the shortcut that applies a preset.
pub fn preset_path(op: &str, preset_name: &str) -> String {
    full_path(&format!("image operations/{op}/preset/{preset_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::key::Modifiers;

    fn ctrl(key: &str) -> Option<Binding> {
        Some(Binding::new(key, Modifiers::CONTROL))
    }

    fn sample() -> AccelRegistry {
        let mut registry = AccelRegistry::new();
        registry
            .register_global("quit", "quit", "global", ctrl("q"))
            .unwrap();
        registry
            .register_view("lighttable", "lighttable", "select all", "select all", "views", ctrl("a"))
            .unwrap();
        registry
            .register_iop("exposure", "exposure", "processing modules", false, "reset", "reset", None)
            .unwrap();
        registry
            .register_module_show("exposure", "exposure", "darkroom", "modules", "show")
            .unwrap();
        registry
    }

    #[test]
    fn test_lookup_with_and_without_prefix() {
        let registry = sample();
        assert!(registry.get("global/quit").is_some());
        assert!(registry.get("<Lumen>/global/quit").is_some());
        assert!(registry.get("global/missing").is_none());
        assert_eq!(registry.binding("global/quit"), ctrl("q").as_ref());
    }

    #[test]
    fn test_view_scope() {
        let registry = sample();
        let accel = registry.get("views/lighttable/select all").unwrap();
        assert_eq!(accel.views, ViewSet::LIGHTTABLE);
        assert_eq!(accel.module, "lighttable");
        assert_eq!(registry.get("global/quit").unwrap().views, ViewSet::all());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = sample();
        let before = registry.len();
        registry
            .register_global("quit", "quit", "global", ctrl("x"))
            .unwrap();
        assert_eq!(registry.len(), before);
        assert_eq!(registry.binding("global/quit"), ctrl("q").as_ref());
    }

    #[test]
    fn test_mismatched_translation_is_skipped() {
        let mut registry = AccelRegistry::new();
        let result = registry.register_path("global/quit", "a`b`c/quit", None, "", false, ViewSet::all());
        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iop_preset_and_blend_paths() {
        let mut registry = AccelRegistry::new();
        registry
            .register_iop(
                "exposure",
                "exposure",
                "processing modules",
                false,
                "preset`+1/2 EV",
                "preset`+1/2 EV",
                None,
            )
            .unwrap();
        registry
            .register_iop("exposure", "exposure", "processing modules", true, "blend`opacity", "blend`opacity", None)
            .unwrap();

        let preset = registry.get("image operations/exposure/preset/+1/2 EV").unwrap();
        let labels: Vec<_> = preset.path.segments().iter().map(|s| s.localized.as_str()).collect();
        assert_eq!(labels, ["processing modules", "exposure", "preset", "+1/2 EV"]);
        assert!(preset.path.segments()[2].pinned);

        let blend = registry.get("image operations/blending/opacity").unwrap();
        assert_eq!(blend.module, "exposure");
        assert!(blend.local);
        assert_eq!(registry.processing_modules(), ["exposure"]);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut registry = sample();
        let snapshot = registry.snapshot();
        registry.clear("global/quit").unwrap();
        assert!(registry.binding("global/quit").is_none());
        registry.restore(snapshot);
        assert_eq!(registry.binding("global/quit"), ctrl("q").as_ref());
    }

    #[test]
    fn test_set_binding_unknown_path() {
        let mut registry = sample();
        assert!(matches!(
            registry.set_binding("global/nope", None),
            Err(PrefsError::UnknownAccelerator(_))
        ));
    }

    #[test]
    fn test_restore_defaults_clears_module_show() {
        let mut registry = sample();
        registry
            .set_binding("darkroom/modules/exposure/show", ctrl("e"))
            .unwrap();
        registry.set_binding("global/quit", ctrl("w")).unwrap();

        registry.restore_defaults(None).unwrap();

        assert_eq!(registry.binding("global/quit"), ctrl("q").as_ref());
        assert!(registry.binding("darkroom/modules/exposure/show").is_none());
    }
}
