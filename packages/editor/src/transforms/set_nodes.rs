use super::NodeOptions;
use crate::errors::EditorResult;
use crate::queries::Matcher;
use crate::TreeEditor;
use serde_json::Value;
use trunk_tree::traversal;
use trunk_tree::{Location, Operation, Properties, STRUCTURAL_KEYS};

/// Decides whether `new` should replace the node's current value
pub type Compare<'m> = &'m dyn Fn(&Value, Option<&Value>) -> bool;

/// Combines the node's current value with the requested one
pub type Merge<'m> = &'m dyn Fn(Option<&Value>, &Value) -> Value;

#[derive(Clone, Default)]
pub struct SetNodesOptions<'m> {
    pub at: Option<Location>,
    pub matcher: Option<Matcher<'m>>,
    pub compare: Option<Compare<'m>>,
    pub merge: Option<Merge<'m>>,
}

impl<'m> SetNodesOptions<'m> {
    pub fn at(at: impl Into<Location>) -> Self {
        Self {
            at: Some(at.into()),
            ..Self::default()
        }
    }

    pub fn matching(mut self, matcher: Matcher<'m>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn compare(mut self, compare: Compare<'m>) -> Self {
        self.compare = Some(compare);
        self
    }

    pub fn merge(mut self, merge: Merge<'m>) -> Self {
        self.merge = Some(merge);
        self
    }
}

impl<'m> From<NodeOptions<'m>> for SetNodesOptions<'m> {
    fn from(options: NodeOptions<'m>) -> Self {
        Self {
            at: options.at,
            matcher: options.matcher,
            ..Self::default()
        }
    }
}

/// A `null` request equals an absent value.
fn differs(new: &Value, current: Option<&Value>) -> bool {
    match current {
        Some(current) => current != new,
        None => !new.is_null(),
    }
}

impl TreeEditor {
    /// Patch `props` onto every targeted node. Only keys whose value
    /// actually changes are written; a `null` value deletes the key. Nodes
    /// with nothing to change get no operation.
    pub fn set_nodes(&mut self, props: Properties, options: SetNodesOptions<'_>) -> EditorResult<()> {
        let Some(at) = options.at else {
            return Ok(());
        };

        let compare = options.compare.unwrap_or(&differs);

        for path in self.targets(&at, options.matcher, "setNodes")? {
            let Some(element) = traversal::descendant(&*self.root, &path) else {
                continue;
            };

            let mut properties = Properties::new();
            let mut new_properties = Properties::new();
            let mut changed = false;

            for (key, value) in &props {
                if STRUCTURAL_KEYS.contains(&key.as_str()) {
                    continue;
                }

                let current = element.property(key);
                if !compare(value, current.as_ref()) {
                    continue;
                }

                changed = true;

                if !value.is_null() {
                    let value = match options.merge {
                        Some(merge) => merge(current.as_ref(), value),
                        None => value.clone(),
                    };
                    new_properties.insert(key.clone(), value);
                }

                if let Some(current) = current {
                    properties.insert(key.clone(), current);
                }
            }

            if changed {
                self.apply(Operation::SetNode {
                    path,
                    properties,
                    new_properties,
                })?;
            }
        }

        Ok(())
    }
}
