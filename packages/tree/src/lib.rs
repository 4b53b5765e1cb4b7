//! # Trunk Tree
//!
//! The data layer of the trunk editing engine: a persistent node tree
//! addressed by index paths, and the four primitive operations that mutate
//! it.
//!
//! - [`Path`] algebra, including [`Path::transform`], which translates an
//!   address across an operation
//! - [`Root`] / [`Element`] nodes with `Arc`-shared children
//! - [`Operation`] with inversion and validation
//! - read-only traversal in [`traversal`] and [`visitor`]
//!
//! Applying operations, live references and history live in
//! `trunk-editor`.

pub mod error;
pub mod id;
pub mod location;
pub mod node;
pub mod operation;
pub mod path;
pub mod traversal;
pub mod visitor;

pub use error::{TreeError, TreeResult};
pub use id::{tree_id, IdGenerator};
pub use location::Location;
pub use node::{Element, NodeRef, Properties, Root, IDENTITY_KEYS, STRUCTURAL_KEYS};
pub use operation::Operation;
pub use path::Path;
pub use traversal::{NodeEntry, Nodes, NodesOptions, PassFn};
pub use visitor::{traverse, TraversalOrder, Visitor};
