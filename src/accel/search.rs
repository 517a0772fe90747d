//! Cycling text search over the accelerator tree.

use crate::accel::tree::{AccelNode, AccelTree, NodePath};

/// Substring test with smart case: a query without upper-case letters
/// matches case-insensitively.
pub fn label_matches(label: &str, query: &str) -> bool {
    if query.chars().any(char::is_uppercase) {
        label.contains(query)
    } else {
        label.to_lowercase().contains(query)
    }
}

/// Remembers how many matches of the current query were already shown.
#[derive(Debug, Default, Clone)]
pub struct SearchWalker {
    query: String,
    shown: usize,
}

impl SearchWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.shown = 0;
    }

    /// Number of matches shown so far in the current cycle.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Returns the next match of `query` in pre-order, or `None` once every
    /// match was shown; the call after `None` starts over from the first.
    pub fn search(&mut self, tree: &AccelTree, query: &str) -> Option<NodePath> {
        if query != self.query {
            self.query = query.to_string();
            self.shown = 0;
        }
        if query.is_empty() {
            return None;
        }

        let mut found = 0;
        let mut path = NodePath::new();
        let hit = find_next(tree.roots(), query, self.shown, &mut found, &mut path);
        match hit {
            Some(node) => {
                self.shown = found;
                Some(node)
            }
            None => {
                self.shown = 0;
                None
            }
        }
    }
}

fn find_next(
    nodes: &[AccelNode],
    query: &str,
    skip: usize,
    found: &mut usize,
    path: &mut NodePath,
) -> Option<NodePath> {
    for (i, node) in nodes.iter().enumerate() {
        path.push(i);
        if label_matches(&node.label, query) {
            *found += 1;
            if *found > skip {
                return Some(path.clone());
            }
        }
        if let Some(hit) = find_next(node.children(), query, skip, found, path) {
            return Some(hit);
        }
        path.pop();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::path::AccelPath;

    fn tree(paths: &[(&str, &str)]) -> AccelTree {
        let mut tree = AccelTree::new();
        for (canonical, localized) in paths {
            let path = AccelPath::parse(canonical, localized).unwrap();
            tree.insert(path.segments(), String::new()).unwrap();
        }
        tree
    }

    fn label(tree: &AccelTree, hit: Option<NodePath>) -> Option<String> {
        hit.and_then(|p| tree.node(&p).map(|n| n.label.clone()))
    }

    #[test]
    fn test_cycles_through_matches() {
        let tree = tree(&[
            ("m/crop", "m/Crop"),
            ("m/crop overlay", "m/Crop overlay"),
            ("m/color", "m/Color"),
        ]);
        let mut walker = SearchWalker::new();
        assert_eq!(label(&tree, walker.search(&tree, "cro")).as_deref(), Some("Crop"));
        assert_eq!(
            label(&tree, walker.search(&tree, "cro")).as_deref(),
            Some("Crop overlay")
        );
        assert_eq!(walker.search(&tree, "cro"), None);
        assert_eq!(label(&tree, walker.search(&tree, "cro")).as_deref(), Some("Crop"));
    }

    #[test]
    fn test_changed_query_restarts() {
        let tree = tree(&[("m/crop", "m/Crop"), ("m/crop overlay", "m/Crop overlay")]);
        let mut walker = SearchWalker::new();
        walker.search(&tree, "Crop");
        assert_eq!(walker.shown(), 1);
        let hit = walker.search(&tree, "overlay");
        assert_eq!(label(&tree, hit).as_deref(), Some("Crop overlay"));
        assert_eq!(walker.shown(), 1);
    }

    #[test]
    fn test_branches_match_before_their_children() {
        let tree = tree(&[("crop/crop left", "crop/crop left")]);
        let mut walker = SearchWalker::new();
        assert_eq!(walker.search(&tree, "crop").unwrap().as_slice(), &[0]);
        assert_eq!(walker.search(&tree, "crop").unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn test_upper_case_query_is_case_sensitive() {
        assert!(label_matches("Crop", "cro"));
        assert!(label_matches("Crop", "Cro"));
        assert!(!label_matches("crop", "Cro"));
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let tree = tree(&[("m/crop", "m/Crop")]);
        assert_eq!(SearchWalker::new().search(&tree, ""), None);
    }
}
