//! Hierarchical view of the accelerator registry.
//!
//! The tree is rebuilt from the registry whenever the shortcuts tab opens and
//! relabelled in full after every binding change.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::accel::key::binding_label;
use crate::accel::path::{Segment, full_path};
use crate::accel::registry::AccelRegistry;
use crate::error::{PrefsError, Result};

/// Child indices from the root down to a node.
pub type NodePath = SmallVec<[usize; 8]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Branch { children: Vec<AccelNode> },
    Leaf { binding_label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelNode {
    /// Canonical segment, unique among siblings.
    pub key: String,
    /// Localized label.
    pub label: String,
    pub pinned: bool,
    pub kind: NodeKind,
}

impl AccelNode {
    fn branch(segment: &Segment) -> Self {
        Self {
            key: segment.canonical.clone(),
            label: segment.localized.clone(),
            pinned: segment.pinned,
            kind: NodeKind::Branch {
                children: Vec::new(),
            },
        }
    }

    fn leaf(segment: &Segment, binding_label: String) -> Self {
        Self {
            key: segment.canonical.clone(),
            label: segment.localized.clone(),
            pinned: segment.pinned,
            kind: NodeKind::Leaf { binding_label },
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, NodeKind::Branch { .. })
    }

    pub fn children(&self) -> &[AccelNode] {
        match &self.kind {
            NodeKind::Branch { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// Binding label of a leaf; `None` for branches.
    pub fn binding_label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { binding_label } => Some(binding_label),
            NodeKind::Branch { .. } => None,
        }
    }
}

/// Approximation of locale collation: case-folded order, ties broken by the
/// raw strings.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sibling order: pinned first, then branches before leaves, then labels.
pub fn compare_siblings(a: &AccelNode, b: &AccelNode) -> Ordering {
    match (a.pinned, b.pinned) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (true, true) => return collate(&a.label, &b.label),
        (false, false) => {}
    }
    b.is_branch()
        .cmp(&a.is_branch())
        .then_with(|| collate(&a.label, &b.label))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccelTree {
    roots: Vec<AccelNode>,
}

impl AccelTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and sorts the tree from every registered accelerator.
    pub fn build(registry: &AccelRegistry) -> Self {
        let mut tree = Self::new();
        for accel in registry.iter() {
            let label = binding_label(accel.binding.as_ref());
            if let Err(e) = tree.insert(accel.path.segments(), label) {
                tracing::warn!(error = %e, "accelerator left out of the tree");
            }
        }
        tree.sort();
        tree
    }

    pub fn roots(&self) -> &[AccelNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Inserts a path, creating missing branches. Inserting an existing path
    /// overwrites the leaf label.
    pub fn insert(&mut self, segments: &[Segment], label: String) -> Result<NodePath> {
        let Some((last, branches)) = segments.split_last() else {
            return Err(PrefsError::EmptyPath);
        };
        let shape_error = || {
            let joined: Vec<&str> = segments.iter().map(|s| s.canonical.as_str()).collect();
            PrefsError::PathShape(full_path(&joined.join("/")))
        };

        let mut node_path = NodePath::new();
        let mut level = &mut self.roots;
        for segment in branches {
            let index = match level.iter().position(|n| n.key == segment.canonical) {
                Some(i) => i,
                None => {
                    level.push(AccelNode::branch(segment));
                    level.len() - 1
                }
            };
            node_path.push(index);
            level = match &mut level[index].kind {
                NodeKind::Branch { children } => children,
                NodeKind::Leaf { .. } => return Err(shape_error()),
            };
        }

        match level.iter().position(|n| n.key == last.canonical) {
            Some(i) => match &mut level[i].kind {
                NodeKind::Leaf { binding_label } => {
                    *binding_label = label;
                    node_path.push(i);
                }
                NodeKind::Branch { .. } => return Err(shape_error()),
            },
            None => {
                level.push(AccelNode::leaf(last, label));
                node_path.push(level.len() - 1);
            }
        }
        Ok(node_path)
    }

    /// Sorts every sibling list. Node paths taken before sorting are stale.
    pub fn sort(&mut self) {
        fn sort_level(nodes: &mut [AccelNode]) {
            nodes.sort_by(compare_siblings);
            for node in nodes {
                if let NodeKind::Branch { children } = &mut node.kind {
                    sort_level(children);
                }
            }
        }
        sort_level(&mut self.roots);
    }

    pub fn node(&self, path: &[usize]) -> Option<&AccelNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut AccelNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for &i in rest {
            node = match &mut node.kind {
                NodeKind::Branch { children } => children.get_mut(i)?,
                NodeKind::Leaf { .. } => return None,
            };
        }
        Some(node)
    }

    /// Full canonical path of a node, rebuilt from its ancestors' keys.
    pub fn canonical_path(&self, path: &[usize]) -> Option<String> {
        let mut keys = Vec::with_capacity(path.len());
        let mut level = self.roots.as_slice();
        for &i in path {
            let node = level.get(i)?;
            keys.push(node.key.as_str());
            level = node.children();
        }
        if keys.is_empty() {
            return None;
        }
        Some(full_path(&keys.join("/")))
    }

    /// Locates the leaf of a canonical path (with or without prefix).
    pub fn leaf_for_path(&self, path: &str) -> Option<NodePath> {
        let full = full_path(path);
        let mut rest = full.split_once('/').map(|(_, r)| r)?;
        let mut node_path = NodePath::new();
        let mut level = self.roots.as_slice();
        loop {
            let (index, node, remainder) = level.iter().enumerate().find_map(|(i, n)| {
                if rest == n.key {
                    Some((i, n, None))
                } else {
                    rest.strip_prefix(n.key.as_str())
                        .and_then(|r| r.strip_prefix('/'))
                        .filter(|_| n.is_branch())
                        .map(|r| (i, n, Some(r)))
                }
            })?;
            node_path.push(index);
            match remainder {
                None => return (!node.is_branch()).then_some(node_path),
                Some(r) => {
                    rest = r;
                    level = node.children();
                }
            }
        }
    }

    /// Proper ancestors of a node, outermost first.
    pub fn ancestors(path: &[usize]) -> Vec<NodePath> {
        (1..path.len()).map(|n| NodePath::from_slice(&path[..n])).collect()
    }

    pub fn set_leaf_label(&mut self, path: &[usize], label: String) -> bool {
        match self.node_mut(path).map(|n| &mut n.kind) {
            Some(NodeKind::Leaf { binding_label }) => {
                *binding_label = label;
                true
            }
            _ => false,
        }
    }

    /// Rewrites every leaf label from the registry's current bindings.
    pub fn refresh_labels(&mut self, registry: &AccelRegistry) {
        fn walk(nodes: &mut [AccelNode], prefix: &mut Vec<String>, registry: &AccelRegistry) {
            for node in nodes {
                prefix.push(node.key.clone());
                match &mut node.kind {
                    NodeKind::Branch { children } => walk(children, prefix, registry),
                    NodeKind::Leaf { binding_label: label } => {
                        *label = binding_label(registry.binding(&prefix.join("/")));
                    }
                }
                prefix.pop();
            }
        }
        walk(&mut self.roots, &mut Vec::new(), registry);
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &[AccelNode]) -> usize {
            nodes
                .iter()
                .map(|n| if n.is_branch() { count(n.children()) } else { 1 })
                .sum()
        }
        count(&self.roots)
    }
}
