//! # Trunk Editor
//!
//! Editing engine over a `trunk-tree` document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ transforms: insert/remove/set/unset/move/   │
//! │             lift/unwrap/wrap                │
//! │  - find targets, hold them as path refs     │
//! │  - emit one primitive operation per step    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ apply: the only way a tree changes          │
//! │  - copy-on-write draft of the snapshot      │
//! │  - history, path refs, dirty paths          │
//! │  - commit, log, schedule a flush            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ flush: one change notification per batch    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are immutable**: an apply builds a new root and shares
//!    every untouched subtree with the old one
//! 2. **Failed applies change nothing**: no history, no ref updates, no log
//! 3. **Paths are the identity**: refs keep them current across edits
//! 4. **Editors are independent**: all state lives on the editor value
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trunk_editor::{NodeOptions, TreeEditor};
//! use trunk_tree::{path, Element};
//!
//! let mut editor = TreeEditor::new(vec![Element::new("a", "paragraph")]);
//! editor.set_on_change(|event| println!("{} operations", event.operations.len()));
//!
//! editor.insert_node(Element::new("b", "paragraph"), NodeOptions::at(path![1]))?;
//! editor.wrap_nodes(Element::new("q", "quote"), NodeOptions::at(path![1]))?;
//! editor.flush();
//!
//! editor.undo()?;
//! ```

mod apply;
mod config;
mod dirty_paths;
mod editor;
mod errors;
mod flush;
mod path_ref;
mod queries;
mod transforms;

#[cfg(feature = "history")]
mod history;

pub use config::{EditorConfig, DEFAULT_MAX_UNDO_LEVELS};
pub use dirty_paths::{get_dirty_paths, DirtyPaths};
pub use editor::TreeEditor;
pub use errors::{DefaultErrorHandler, EditorError, EditorResult, ErrorHandler, ErrorKind, Resolution};
pub use flush::{BatchGuard, ChangeEvent};
pub use path_ref::{PathRef, PathRefs};
pub use queries::{Matcher, Query};
pub use transforms::{child_of, Compare, Merge, NodeOptions, SetNodesOptions};

#[cfg(feature = "history")]
pub use history::{Batch, History};

// Re-export the tree types callers need alongside the editor
pub use trunk_tree::{Element, Location, NodeEntry, NodeRef, Operation, Path, Properties, Root};
