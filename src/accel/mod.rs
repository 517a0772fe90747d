//! Keyboard accelerators: registry, tree view model, remapping and search.

pub mod catalog;
pub mod key;
pub mod path;
pub mod registry;
pub mod remap;
pub mod search;
pub mod tree;

pub use key::{Binding, Key, KeyEvent, Modifiers, binding_label};
pub use path::{AccelPath, Segment};
pub use registry::{AccelRegistry, Accelerator, BindingSnapshot, ViewSet};
pub use remap::{KeyOutcome, PendingRemap, RemapState, Remapper, find_conflict};
pub use search::SearchWalker;
pub use tree::{AccelNode, AccelTree, NodeKind, NodePath};
