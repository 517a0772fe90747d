//! Remapping a shortcut: the collision rule and the remap state machine.

use crate::accel::key::{Binding, KeyEvent};
use crate::accel::registry::{AccelRegistry, Accelerator};
use crate::accel::tree::NodePath;
use crate::error::{PrefsError, Result};

/// Whether `other` would fight with `target` once `target` is bound to
/// `candidate`.
///
/// Two local accelerators of different modules never collide, and neither do
/// accelerators active in disjoint views.
pub fn collides(candidate: &Binding, target: &Accelerator, other: &Accelerator) -> bool {
    other.binding.as_ref() == Some(candidate)
        && !(other.local && target.local && other.module != target.module)
        && other.views.intersects(target.views)
}

/// First accelerator, in registration order, that collides with binding
/// `path` to `candidate`.
pub fn find_conflict<'a>(
    registry: &'a AccelRegistry,
    path: &str,
    candidate: &Binding,
) -> Option<&'a Accelerator> {
    let target_index = registry.position(path)?;
    let target = registry.get_index(target_index)?;
    registry
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_index)
        .map(|(_, a)| a)
        .find(|a| collides(candidate, target, a))
}

/// Binds `path` and unbinds every other accelerator colliding with the new
/// binding. Returns the paths that were cleared.
pub fn apply_with_conflict_clearing(
    registry: &mut AccelRegistry,
    path: &str,
    binding: Binding,
) -> Result<Vec<String>> {
    let target_index = registry
        .position(path)
        .ok_or_else(|| PrefsError::UnknownAccelerator(path.to_string()))?;
    registry.set_binding_at(target_index, Some(binding.clone()));

    let colliding: Vec<(usize, String)> = {
        let Some(target) = registry.get_index(target_index) else {
            return Ok(Vec::new());
        };
        registry
            .iter()
            .enumerate()
            .filter(|(i, a)| *i != target_index && collides(&binding, target, a))
            .map(|(i, a)| (i, a.path.as_str().to_string()))
            .collect()
    };
    for (index, cleared) in &colliding {
        tracing::debug!(path = %cleared, "clearing colliding binding");
        registry.set_binding_at(*index, None);
    }
    Ok(colliding.into_iter().map(|(_, p)| p).collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RemapState {
    #[default]
    Idle,
    AwaitingKey { path: String, node: NodePath },
}

/// A remap that collides and waits for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemap {
    pub path: String,
    pub node: NodePath,
    pub binding: Binding,
    /// Localized path of the first colliding accelerator.
    pub conflict_path: String,
}

/// What a key press means for the remap in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing awaited or a bare modifier; state is unchanged.
    Ignored,
    /// No collision; the binding can be applied right away.
    Apply {
        path: String,
        node: NodePath,
        binding: Binding,
    },
    Confirm(PendingRemap),
}

#[derive(Debug, Default)]
pub struct Remapper {
    state: RemapState,
}

impl Remapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RemapState {
        &self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, RemapState::AwaitingKey { .. })
    }

    /// Node currently waiting for a key.
    pub fn awaiting_node(&self) -> Option<&NodePath> {
        match &self.state {
            RemapState::AwaitingKey { node, .. } => Some(node),
            RemapState::Idle => None,
        }
    }

    pub fn begin(&mut self, path: String, node: NodePath) {
        self.state = RemapState::AwaitingKey { path, node };
    }

    /// Drops the remap in progress, returning what was awaited.
    pub fn cancel(&mut self) -> Option<(String, NodePath)> {
        match std::mem::take(&mut self.state) {
            RemapState::AwaitingKey { path, node } => Some((path, node)),
            RemapState::Idle => None,
        }
    }

    /// Resolves a key press. Any outcome other than [`KeyOutcome::Ignored`]
    /// returns the state machine to idle.
    pub fn handle_key(&mut self, registry: &AccelRegistry, event: &KeyEvent) -> KeyOutcome {
        if event.key.is_modifier() || !self.is_awaiting() {
            return KeyOutcome::Ignored;
        }
        let Some((path, node)) = self.cancel() else {
            return KeyOutcome::Ignored;
        };
        let binding = event.to_binding();
        match find_conflict(registry, &path, &binding) {
            None => KeyOutcome::Apply {
                path,
                node,
                binding,
            },
            Some(conflict) => KeyOutcome::Confirm(PendingRemap {
                conflict_path: conflict.path.localized(),
                path,
                node,
                binding,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::key::Modifiers;
    use crate::accel::registry::ViewSet;

    fn register(
        registry: &mut AccelRegistry,
        path: &str,
        binding: Option<Binding>,
        module: &str,
        local: bool,
        views: ViewSet,
    ) {
        registry
            .register_path(path, path, binding, module, local, views)
            .unwrap();
    }

    fn ctrl_e() -> Binding {
        Binding::new("e", Modifiers::CONTROL)
    }

    #[test]
    fn test_disjoint_views_do_not_conflict() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "views/map/a", Some(ctrl_e()), "map", false, ViewSet::MAP);
        register(&mut registry, "views/print/b", None, "print", false, ViewSet::PRINT);
        assert!(find_conflict(&registry, "views/print/b", &ctrl_e()).is_none());
    }

    #[test]
    fn test_local_bindings_of_different_modules_do_not_conflict() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "iop/exposure/a", Some(ctrl_e()), "exposure", true, ViewSet::DARKROOM);
        register(&mut registry, "iop/crop/b", None, "crop", true, ViewSet::DARKROOM);
        assert!(find_conflict(&registry, "iop/crop/b", &ctrl_e()).is_none());
    }

    #[test]
    fn test_one_global_side_conflicts() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "iop/exposure/a", Some(ctrl_e()), "exposure", true, ViewSet::DARKROOM);
        register(&mut registry, "global/b", None, "", false, ViewSet::all());
        let conflict = find_conflict(&registry, "global/b", &ctrl_e()).unwrap();
        assert_eq!(conflict.path.relative(), "iop/exposure/a");
    }

    #[test]
    fn test_local_bindings_of_same_module_conflict() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "iop/exposure/a", Some(ctrl_e()), "exposure", true, ViewSet::DARKROOM);
        register(&mut registry, "iop/exposure/b", None, "exposure", true, ViewSet::DARKROOM);
        assert!(find_conflict(&registry, "iop/exposure/b", &ctrl_e()).is_some());
    }

    #[test]
    fn test_first_conflict_in_registration_order() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "global/first", Some(ctrl_e()), "", false, ViewSet::all());
        register(&mut registry, "global/second", Some(ctrl_e()), "", false, ViewSet::all());
        register(&mut registry, "global/target", None, "", false, ViewSet::all());
        let conflict = find_conflict(&registry, "global/target", &ctrl_e()).unwrap();
        assert_eq!(conflict.path.relative(), "global/first");
    }

    #[test]
    fn test_remapping_to_own_binding_is_not_a_conflict() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "global/a", Some(ctrl_e()), "", false, ViewSet::all());
        assert!(find_conflict(&registry, "global/a", &ctrl_e()).is_none());
    }

    #[test]
    fn test_apply_clears_every_collision() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "global/first", Some(ctrl_e()), "", false, ViewSet::all());
        register(&mut registry, "views/map/second", Some(ctrl_e()), "map", false, ViewSet::MAP);
        register(&mut registry, "views/print/third", Some(ctrl_e()), "print", false, ViewSet::PRINT);
        register(&mut registry, "views/map/target", None, "map", false, ViewSet::MAP);

        let cleared = apply_with_conflict_clearing(&mut registry, "views/map/target", ctrl_e()).unwrap();

        assert_eq!(cleared, ["<Lumen>/global/first", "<Lumen>/views/map/second"]);
        assert_eq!(registry.binding("views/map/target"), Some(&ctrl_e()));
        assert!(registry.binding("global/first").is_none());
        assert_eq!(registry.binding("views/print/third"), Some(&ctrl_e()));
    }

    #[test]
    fn test_state_machine() {
        let mut registry = AccelRegistry::new();
        register(&mut registry, "global/a", Some(ctrl_e()), "", false, ViewSet::all());
        register(&mut registry, "global/b", None, "", false, ViewSet::all());

        let mut remapper = Remapper::new();
        let idle_press = KeyEvent::new("e", Modifiers::CONTROL);
        assert_eq!(remapper.handle_key(&registry, &idle_press), KeyOutcome::Ignored);

        remapper.begin("<Lumen>/global/b".to_string(), NodePath::from_slice(&[0, 1]));
        let modifier = KeyEvent::new("Control_L", Modifiers::CONTROL);
        assert_eq!(remapper.handle_key(&registry, &modifier), KeyOutcome::Ignored);
        assert!(remapper.is_awaiting());

        let outcome = remapper.handle_key(&registry, &KeyEvent::new("E", Modifiers::CONTROL));
        let KeyOutcome::Confirm(pending) = outcome else {
            panic!("expected a confirmation, got {outcome:?}");
        };
        assert_eq!(pending.conflict_path, "global/a");
        assert_eq!(pending.binding, ctrl_e());
        assert!(!remapper.is_awaiting());

        remapper.begin("<Lumen>/global/b".to_string(), NodePath::from_slice(&[0, 1]));
        let outcome = remapper.handle_key(&registry, &KeyEvent::new("F5", Modifiers::empty()));
        assert!(matches!(outcome, KeyOutcome::Apply { .. }));
    }

    #[test]
    fn test_cancel() {
        let mut remapper = Remapper::new();
        assert!(remapper.cancel().is_none());
        remapper.begin("<Lumen>/global/b".to_string(), NodePath::from_slice(&[3]));
        let (path, node) = remapper.cancel().unwrap();
        assert_eq!(path, "<Lumen>/global/b");
        assert_eq!(node.as_slice(), &[3]);
        assert_eq!(remapper.state(), &RemapState::Idle);
    }
}
