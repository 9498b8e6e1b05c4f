use avatar_rig::{BoneRecord, LocalTransform};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub local: LocalTransform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed transform hierarchy.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        local: LocalTransform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            local,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn local(&self, id: NodeId) -> LocalTransform {
        self.nodes[id.0].local
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Moves `id` under `parent` (or to the top level), keeping its local transform.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(old) = self.nodes[id.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != id);
        }
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes[id.0].parent = parent;
    }

    /// Unlinks `id` and its subtree from the hierarchy. The arena slots stay allocated.
    pub fn detach_subtree(&mut self, id: NodeId) {
        self.set_parent(id, None);
    }

    /// Nodes under `root` (inclusive), parents before children.
    pub fn depth_first(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    pub fn find_in_subtree(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.depth_first(root)
            .into_iter()
            .find(|id| self.nodes[id.0].name == name)
    }

    /// Current local transforms of `root` and everything below it, in hierarchy order.
    pub fn bone_records(&self, root: NodeId) -> Vec<BoneRecord> {
        self.depth_first(root)
            .into_iter()
            .map(|id| BoneRecord::new(self.name(id), self.local(id)))
            .collect()
    }
}
