use super::{NodeOptions, SetNodesOptions};
use crate::errors::EditorResult;
use crate::TreeEditor;
use serde_json::Value;
use trunk_tree::Properties;

impl TreeEditor {
    /// Delete `keys` from every targeted node.
    pub fn unset_nodes(&mut self, keys: &[&str], options: NodeOptions<'_>) -> EditorResult<()> {
        let props: Properties = keys.iter().map(|key| (key.to_string(), Value::Null)).collect();
        self.set_nodes(props, SetNodesOptions::from(options))
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeOptions, TreeEditor};
    use serde_json::json;
    use trunk_tree::{path, Element, Operation};

    #[test]
    fn test_unset_removes_keys_and_records_them() {
        let mut editor = TreeEditor::new(vec![Element::new("a", "block")
            .with_property("color", "red")
            .with_property("size", 2)]);

        editor.unset_nodes(&["color", "missing"], NodeOptions::at(path![0])).unwrap();

        let node = &editor.children()[0];
        assert!(!node.has_property("color"));
        assert_eq!(node.property("size"), Some(json!(2)));

        let Operation::SetNode {
            properties,
            new_properties,
            ..
        } = &editor.operations()[0]
        else {
            panic!("expected a set_node operation");
        };
        assert_eq!(properties.get("color"), Some(&json!("red")));
        assert!(new_properties.is_empty());
    }
}
