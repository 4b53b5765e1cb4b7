//! # Tree Nodes
//!
//! A tree has exactly one [`Root`] holding the top-level children, and any
//! number of [`Element`]s below it. Children are stored as `Arc<Element>` so
//! that a snapshot can be copied by cloning only the chain of nodes from the
//! root to an edited node; every untouched subtree is shared between the old
//! and the new snapshot.

use crate::error::{TreeError, TreeResult};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Free-form node properties
pub type Properties = serde_json::Map<String, Value>;

/// Property keys that can never be written through a property patch.
pub const STRUCTURAL_KEYS: [&str; 2] = ["children", "text"];

/// Property keys backed by dedicated element fields.
pub const IDENTITY_KEYS: [&str; 2] = ["id", "type"];

/// Element node: stable id, type tag, properties and children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub children: Vec<Arc<Element>>,

    #[serde(flatten)]
    pub properties: Properties,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            children: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index).map(Arc::as_ref)
    }

    /// Read a property. `id` and `type` resolve to the element's own fields.
    pub fn property(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::String(self.id.clone())),
            "type" => Some(Value::String(self.kind.clone())),
            _ => self.properties.get(key).cloned(),
        }
    }

    pub fn has_property(&self, key: &str) -> bool {
        IDENTITY_KEYS.contains(&key) || self.properties.contains_key(key)
    }

    /// Write (`Some`) or delete (`None`) a property.
    pub fn set_property(&mut self, key: &str, value: Option<Value>) -> TreeResult<()> {
        if STRUCTURAL_KEYS.contains(&key) {
            return Err(TreeError::StructuralProperty(key.to_string()));
        }

        match (key, value) {
            ("id" | "type", None) => Err(TreeError::RequiredProperty(key.to_string())),
            ("id", Some(Value::String(id))) => {
                self.id = id;
                Ok(())
            }
            ("type", Some(Value::String(kind))) => {
                self.kind = kind;
                Ok(())
            }
            ("id" | "type", Some(_)) => Err(TreeError::InvalidPropertyValue(key.to_string())),
            (_, Some(value)) => {
                self.properties.insert(key.to_string(), value);
                Ok(())
            }
            (_, None) => {
                self.properties.remove(key);
                Ok(())
            }
        }
    }

    /// Copy of this element with its children dropped.
    pub fn shell(&self) -> Element {
        Element {
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// The single root of a tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub id: String,

    #[serde(default)]
    pub data: Properties,

    #[serde(default)]
    pub children: Vec<Arc<Element>>,
}

impl Root {
    pub fn new(id: impl Into<String>, children: impl IntoIterator<Item = Element>) -> Self {
        Self {
            id: id.into(),
            data: Properties::new(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Root(self)
    }

    /// Children of the node at `path`, copying every shared node on the way
    /// down so the returned vector is exclusively owned by this root.
    pub fn children_mut(&mut self, path: &Path) -> Option<&mut Vec<Arc<Element>>> {
        let mut children = &mut self.children;

        for &index in path.iter() {
            let child = children.get_mut(index)?;
            children = &mut Arc::make_mut(child).children;
        }

        Some(children)
    }

    /// The element at `path`, copied out of any shared subtree.
    pub fn element_mut(&mut self, path: &Path) -> Option<&mut Element> {
        let (index, parent) = path.split_last()?;
        let siblings = self.children_mut(&Path::from(parent))?;
        siblings.get_mut(*index).map(Arc::make_mut)
    }
}

/// Borrowed view of either kind of node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Root(&'a Root),
    Element(&'a Element),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Root(root) => &root.id,
            NodeRef::Element(element) => &element.id,
        }
    }

    pub fn children(&self) -> &'a [Arc<Element>] {
        match self {
            NodeRef::Root(root) => &root.children,
            NodeRef::Element(element) => &element.children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&'a Element> {
        self.children().get(index).map(Arc::as_ref)
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodeRef::Root(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, NodeRef::Element(_))
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    pub fn as_element(&self) -> Option<&'a Element> {
        match self {
            NodeRef::Element(element) => Some(element),
            NodeRef::Root(_) => None,
        }
    }

    /// Element type tag, `None` for the root.
    pub fn kind(&self) -> Option<&'a str> {
        self.as_element().map(|element| element.kind.as_str())
    }

    pub fn property(&self, key: &str) -> Option<Value> {
        match self {
            NodeRef::Root(root) if key == "id" => Some(Value::String(root.id.clone())),
            NodeRef::Root(root) => root.data.get(key).cloned(),
            NodeRef::Element(element) => element.property(key),
        }
    }

    /// Identity comparison: both views point at the same allocation.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        match (self, other) {
            (NodeRef::Root(a), NodeRef::Root(b)) => std::ptr::eq(*a, *b),
            (NodeRef::Element(a), NodeRef::Element(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl<'a> From<&'a Root> for NodeRef<'a> {
    fn from(root: &'a Root) -> Self {
        NodeRef::Root(root)
    }
}

impl<'a> From<&'a Element> for NodeRef<'a> {
    fn from(element: &'a Element) -> Self {
        NodeRef::Element(element)
    }
}
