//! In-memory folder tree, stored as an arena of nodes.

use time::macros::datetime;
use time::OffsetDateTime;

use crate::error::{DriveError, Result};

/// Timestamp used when Drive omits a time or sends one that does not parse.
pub const ZERO_TIMESTAMP: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One Drive object: a folder or a leaf file.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub is_dir: bool,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        is_dir: bool,
        created_at: OffsetDateTime,
        modified_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_dir,
            created_at,
            modified_at,
            children: Vec::new(),
        }
    }

    /// Children in discovery order. Always empty for files.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena owning every node of one walk. Parent links are indices, and a node
/// is only ever attached once, to the folder it was listed under.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Start a tree with `root` as its only node.
    pub fn new(root: Node) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// If `id` was issued by a different tree and is out of range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Append `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: Node) -> Result<NodeId> {
        let parent_node = &self.nodes[parent.0];
        if !parent_node.is_dir {
            return Err(DriveError::NotADirectory(parent_node.name.clone()));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.node(id).children.iter().map(move |&c| self.node(c))
    }

    /// Total number of nodes, root included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf files anywhere in the tree.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_dir).count()
    }
}
