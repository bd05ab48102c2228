use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::PropertyValue;
use crate::suppressions::Suppression;

/// What a node in the construct tree represents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Stack { stack_name: String, nested: bool },
    Resource { cfn_type: String, logical_id: String },
    Group,
}

/// One node of the infrastructure-definition tree.
///
/// The engine only ever reads nodes; the single permitted mutation is
/// attaching suppression entries to node metadata through the registration
/// API in [`crate::suppressions`]. Paths are `/`-joined id segments starting
/// at the root, e.g. `/App/Storage/Bucket`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstructNode {
    id: String,
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    suppressions: Vec<Suppression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ConstructNode>,
}

impl ConstructNode {
    pub fn stack(id: impl Into<String>) -> Self {
        let id = id.into();
        let stack_name = id.clone();
        Self::new(
            id,
            NodeKind::Stack {
                stack_name,
                nested: false,
            },
        )
    }

    pub fn nested_stack(id: impl Into<String>) -> Self {
        let id = id.into();
        let stack_name = id.clone();
        Self::new(
            id,
            NodeKind::Stack {
                stack_name,
                nested: true,
            },
        )
    }

    pub fn resource(id: impl Into<String>, cfn_type: impl Into<String>) -> Self {
        let id = id.into();
        let logical_id = id.clone();
        Self::new(
            id,
            NodeKind::Resource {
                cfn_type: cfn_type.into(),
                logical_id,
            },
        )
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(id.into(), NodeKind::Group)
    }

    fn new(id: String, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            properties: BTreeMap::new(),
            suppressions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_child(mut self, child: ConstructNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: ConstructNode) {
        self.children.push(child);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_stack(&self) -> bool {
        matches!(self.kind, NodeKind::Stack { .. })
    }

    pub fn is_resource(&self) -> bool {
        matches!(self.kind, NodeKind::Resource { .. })
    }

    pub fn children(&self) -> &[ConstructNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ConstructNode] {
        &mut self.children
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Suppression entries attached to this node's metadata.
    pub fn suppressions(&self) -> &[Suppression] {
        &self.suppressions
    }

    pub fn attach_suppressions(&mut self, entries: impl IntoIterator<Item = Suppression>) {
        self.suppressions.extend(entries);
    }

    /// Resolves a `/`-joined path against the tree rooted at this node. The
    /// first segment must be this node's id; matching is exact.
    pub fn find_node(&self, path: &str) -> Option<&ConstructNode> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        if segments.next() != Some(self.id.as_str()) {
            return None;
        }
        let mut current = self;
        for segment in segments {
            current = current
                .children
                .iter()
                .find(|child| child.id == segment)?;
        }
        Some(current)
    }

    pub fn find_node_mut(&mut self, path: &str) -> Option<&mut ConstructNode> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        if segments.next() != Some(self.id.as_str()) {
            return None;
        }
        let mut current = self;
        for segment in segments {
            current = current
                .children
                .iter_mut()
                .find(|child| child.id == segment)?;
        }
        Some(current)
    }
}

/// Read-only view of a resource node handed to rule callbacks, pairing the
/// node with its absolute tree path.
#[derive(Clone, Copy, Debug)]
pub struct ResourceView<'a> {
    path: &'a str,
    node: &'a ConstructNode,
}

impl<'a> ResourceView<'a> {
    pub fn new(path: &'a str, node: &'a ConstructNode) -> Self {
        debug_assert!(node.is_resource(), "rule callbacks only see resource nodes");
        Self { path, node }
    }

    pub fn path(&self) -> &str {
        self.path
    }

    pub fn cfn_type(&self) -> &str {
        match self.node.kind() {
            NodeKind::Resource { cfn_type, .. } => cfn_type,
            _ => "",
        }
    }

    pub fn logical_id(&self) -> &str {
        match self.node.kind() {
            NodeKind::Resource { logical_id, .. } => logical_id,
            _ => "",
        }
    }

    pub fn property(&self, name: &str) -> Option<&'a PropertyValue> {
        self.node.property(name)
    }
}

#[cfg(test)]
mod tests {
    use super::ConstructNode;
    use crate::model::PropertyValue;

    fn sample_tree() -> ConstructNode {
        ConstructNode::stack("App").with_child(
            ConstructNode::group("Storage").with_child(
                ConstructNode::resource("Bucket", "AWS::S3::Bucket")
                    .with_property("Encrypted", PropertyValue::Bool(true)),
            ),
        )
    }

    #[test]
    fn resolves_exact_paths() {
        let tree = sample_tree();
        let node = tree.find_node("/App/Storage/Bucket").expect("path resolves");
        assert_eq!(node.id(), "Bucket");
        assert!(tree.find_node("App/Storage/Bucket").is_some());
    }

    #[test]
    fn rejects_partial_and_unknown_paths() {
        let tree = sample_tree();
        assert!(tree.find_node("/App/Storage/Other").is_none());
        assert!(tree.find_node("/Other/Storage/Bucket").is_none());
    }

    #[test]
    fn mutable_lookup_reaches_the_same_node() {
        let mut tree = sample_tree();
        let node = tree
            .find_node_mut("/App/Storage/Bucket")
            .expect("path resolves");
        assert_eq!(node.id(), "Bucket");
    }
}
