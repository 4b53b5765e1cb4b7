//! # Operations
//!
//! The closed set of primitive edits. Every higher-level transform is
//! expressed as a sequence of these four operations, and undo is derived by
//! inverting them.
//!
//! All paths carried by an operation are *pre-image* addresses: they are
//! valid against the tree as it was before the operation was applied.

use crate::error::{TreeError, TreeResult};
use crate::node::{Element, Properties};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive tree operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Insert `node` so that it ends up at `path`
    InsertNode { node: Element, path: Path },

    /// Move the node at `path` so that it lands at `new_path`
    MoveNode {
        path: Path,
        #[serde(rename = "newPath")]
        new_path: Path,
    },

    /// Remove `node`, currently found at `path`
    RemoveNode { node: Element, path: Path },

    /// Patch properties of the node at `path`.
    ///
    /// `properties` holds the prior values of every changed key that existed,
    /// `new_properties` the values to write. A `null` in `new_properties`
    /// deletes the key.
    SetNode {
        path: Path,
        properties: Properties,
        #[serde(rename = "newProperties")]
        new_properties: Properties,
    },
}

impl Operation {
    pub fn path(&self) -> &Path {
        match self {
            Operation::InsertNode { path, .. }
            | Operation::MoveNode { path, .. }
            | Operation::RemoveNode { path, .. }
            | Operation::SetNode { path, .. } => path,
        }
    }

    /// Wire name of the operation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::InsertNode { .. } => "insert_node",
            Operation::MoveNode { .. } => "move_node",
            Operation::RemoveNode { .. } => "remove_node",
            Operation::SetNode { .. } => "set_node",
        }
    }

    /// Whether the operation can shift or delete paths.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Operation::SetNode { .. })
    }

    /// The operation that undoes this one when applied right after it.
    pub fn inverse(&self) -> Operation {
        match self {
            Operation::InsertNode { node, path } => Operation::RemoveNode {
                node: node.clone(),
                path: path.clone(),
            },

            Operation::RemoveNode { node, path } => Operation::InsertNode {
                node: node.clone(),
                path: path.clone(),
            },

            Operation::SetNode {
                path,
                properties,
                new_properties,
            } => Operation::SetNode {
                path: path.clone(),
                properties: new_properties.clone(),
                new_properties: properties.clone(),
            },

            Operation::MoveNode { path, new_path } => {
                if path == new_path {
                    return self.clone();
                }

                // Within a single parent both addresses stay stable relative
                // to each other.
                if path.is_sibling(new_path) {
                    return Operation::MoveNode {
                        path: new_path.clone(),
                        new_path: path.clone(),
                    };
                }

                // Across parents the move shifts indices on both ends: the
                // node now lives at the transformed source, and must go back
                // in front of whatever followed it originally.
                let inverse_path = path.transform(self).unwrap_or_else(|| new_path.clone());
                let inverse_new_path = path
                    .next()
                    .and_then(|next| next.transform(self))
                    .unwrap_or_else(|| path.clone());

                Operation::MoveNode {
                    path: inverse_path,
                    new_path: inverse_new_path,
                }
            }
        }
    }

    /// Structural validity check, independent of any tree.
    pub fn validate(&self) -> TreeResult<()> {
        match self {
            Operation::InsertNode { path, .. } | Operation::RemoveNode { path, .. } => {
                if path.is_root() {
                    return Err(TreeError::RootPath { operation: self.kind() });
                }
            }

            Operation::MoveNode { path, new_path } => {
                if path.is_root() || new_path.is_root() {
                    return Err(TreeError::RootPath { operation: self.kind() });
                }

                if path.is_ancestor(new_path) {
                    return Err(TreeError::MoveIntoSelf {
                        path: path.clone(),
                        new_path: new_path.clone(),
                    });
                }
            }

            Operation::SetNode { .. } => {}
        }

        Ok(())
    }

    /// Parse and validate an operation from its JSON form.
    pub fn from_value(value: Value) -> TreeResult<Operation> {
        let operation: Operation = serde_json::from_value(value)?;
        operation.validate()?;
        Ok(operation)
    }

    pub fn is_operation(value: &Value) -> bool {
        Operation::from_value(value.clone()).is_ok()
    }

    pub fn is_operation_list(value: &Value) -> bool {
        value
            .as_array()
            .is_some_and(|items| items.iter().all(Operation::is_operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    #[test]
    fn test_insert_and_remove_invert_each_other() {
        let node = Element::new("n", "block");
        let insert = Operation::InsertNode {
            node: node.clone(),
            path: path![1, 0],
        };

        assert_eq!(
            insert.inverse(),
            Operation::RemoveNode {
                node,
                path: path![1, 0]
            }
        );
        assert_eq!(insert.inverse().inverse(), insert);
    }

    #[test]
    fn test_set_swaps_properties() {
        let mut before = Properties::new();
        before.insert("color".into(), json!("red"));
        let mut after = Properties::new();
        after.insert("color".into(), json!("blue"));

        let op = Operation::SetNode {
            path: path![0],
            properties: before.clone(),
            new_properties: after.clone(),
        };

        assert_eq!(
            op.inverse(),
            Operation::SetNode {
                path: path![0],
                properties: after,
                new_properties: before,
            }
        );
    }

    #[test]
    fn test_sibling_move_inverse_swaps_paths() {
        let op = Operation::MoveNode {
            path: path![0],
            new_path: path![2],
        };

        assert_eq!(
            op.inverse(),
            Operation::MoveNode {
                path: path![2],
                new_path: path![0],
            }
        );
    }

    #[test]
    fn test_cross_parent_move_inverse() {
        // [0] moves into [2] as its first child: after removal the old [2]
        // is at [1], so the node ends up at [1, 0].
        let op = Operation::MoveNode {
            path: path![0],
            new_path: path![2, 0],
        };

        assert_eq!(
            op.inverse(),
            Operation::MoveNode {
                path: path![1, 0],
                new_path: path![0],
            }
        );
    }

    #[test]
    fn test_validate_rejects_root_and_self_nesting() {
        let op = Operation::MoveNode {
            path: path![0],
            new_path: path![0, 1],
        };
        assert!(matches!(op.validate(), Err(TreeError::MoveIntoSelf { .. })));

        let op = Operation::RemoveNode {
            node: Element::new("n", "block"),
            path: path![],
        };
        assert_eq!(
            op.validate(),
            Err(TreeError::RootPath { operation: "remove_node" })
        );
    }

    #[test]
    fn test_wire_format() {
        let value = json!({
            "type": "move_node",
            "path": [0, 1],
            "newPath": [2]
        });

        let op = Operation::from_value(value.clone()).unwrap();
        assert_eq!(
            op,
            Operation::MoveNode {
                path: path![0, 1],
                new_path: path![2],
            }
        );
        assert_eq!(serde_json::to_value(&op).unwrap(), value);

        assert!(!Operation::is_operation(&json!({ "type": "split_node", "path": [0] })));
        assert!(Operation::is_operation_list(&json!([value])));
    }
}
