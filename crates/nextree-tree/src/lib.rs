//! Phylogenetic tree support for Nextree (boundary adapter).
//!
//! This crate sits at the **format boundary**:
//!
//! - It parses Newick-shaped inputs (untrusted), including named internal
//!   nodes and branch lengths in units of divergence.
//! - It exposes a flat arena `Tree` with the traversal primitives the
//!   analysis layer needs: pre-order iteration, subtree enumeration, and
//!   node lookup by name.
//!
//! Name lookup treats an ambiguous match (two tree nodes sharing a name)
//! as a hard data-integrity fault rather than picking one arbitrarily.

pub mod newick;

use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid newick near `{snippet}`")]
    Parse { snippet: String },
    #[error("trailing content after newick terminator: `{snippet}`")]
    TrailingContent { snippet: String },
    #[error("newick input is empty")]
    Empty,
    #[error("node name `{name}` matches {count} tree nodes")]
    AmbiguousName { name: String, count: usize },
    #[error("reading tree file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Index of a node in the tree arena. Valid only for the `Tree` it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Stable arena index, usable as an export identifier.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Branch length from this node to its parent (0.0 when absent,
    /// including at the root).
    pub dist: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Rooted phylogenetic tree stored as a flat arena.
///
/// Node 0 is always the root; children keep the order they appeared in the
/// Newick source, so pre-order traversal is deterministic.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    name_index: HashMap<String, Vec<NodeId>>,
}

impl Tree {
    /// Parse a Newick string into a tree.
    pub fn from_newick(input: &str) -> Result<Self, TreeError> {
        newick::parse(input)
    }

    /// Read and parse a Newick file.
    pub fn from_newick_file(path: &Path) -> Result<Self, TreeError> {
        let source = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tree = newick::parse(&source)?;
        tracing::debug!(
            path = %path.display(),
            nodes = tree.len(),
            "parsed newick tree"
        );
        Ok(tree)
    }

    pub(crate) fn from_raw(root: newick::RawNode) -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            name_index: HashMap::new(),
        };
        tree.push_subtree(root, None);
        tree
    }

    fn push_subtree(&mut self, raw: newick::RawNode, parent: Option<NodeId>) -> NodeId {
        let newick::RawNode {
            name,
            dist,
            children,
        } = raw;
        let id = NodeId(self.nodes.len());
        if !name.is_empty() {
            self.name_index.entry(name.clone()).or_default().push(id);
        }
        self.nodes.push(TreeNode {
            name,
            dist: dist.unwrap_or(0.0),
            parent,
            children: Vec::new(),
        });
        for child in children {
            let child_id = self.push_subtree(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn dist(&self, id: NodeId) -> f64 {
        self.nodes[id.0].dist
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Pre-order traversal over the whole tree, root first.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// All nodes strictly below `id` (the full subtree, excluding `id`
    /// itself), in pre-order.
    pub fn descendants(&self, id: NodeId) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.nodes[id.0].children.iter().rev().copied().collect(),
        }
    }

    /// Look up the single node carrying `name`.
    ///
    /// Zero matches is a legitimate `None`; more than one match is a
    /// data-integrity fault and never silently resolved.
    pub fn find_by_name(&self, name: &str) -> Result<Option<NodeId>, TreeError> {
        match self.name_index.get(name) {
            None => Ok(None),
            Some(ids) if ids.len() == 1 => Ok(Some(ids[0])),
            Some(ids) => Err(TreeError::AmbiguousName {
                name: name.to_string(),
                count: ids.len(),
            }),
        }
    }
}

/// Depth-first pre-order iterator; children are visited in source order.
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        self.stack.extend(node.children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_tree() -> Tree {
        Tree::from_newick("((A:0.1,B:0.2)NODE_1:0.05,C:0.3)NODE_0:0.0;").unwrap()
    }

    #[test]
    fn preorder_visits_root_first_in_source_order() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.preorder().map(|id| tree.name(id)).collect();
        assert_eq!(names, vec!["NODE_0", "NODE_1", "A", "B", "C"]);
    }

    #[test]
    fn descendants_exclude_the_node_itself() {
        let tree = sample_tree();
        let node_1 = tree.find_by_name("NODE_1").unwrap().unwrap();
        let names: Vec<&str> = tree.descendants(node_1).map(|id| tree.name(id)).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(tree.descendants(tree.root()).count(), tree.len() - 1);
    }

    #[test]
    fn parent_links_and_distances() {
        let tree = sample_tree();
        let a = tree.find_by_name("A").unwrap().unwrap();
        let parent = tree.parent(a).unwrap();
        assert_eq!(tree.name(parent), "NODE_1");
        assert_relative_eq!(tree.dist(a), 0.1);
        assert_relative_eq!(tree.dist(parent), 0.05);
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn unknown_name_is_none_duplicate_name_is_an_error() {
        let tree = sample_tree();
        assert!(tree.find_by_name("nope").unwrap().is_none());

        let dup = Tree::from_newick("((A:0.1,A:0.2)N:0.0);").unwrap();
        match dup.find_by_name("A") {
            Err(TreeError::AmbiguousName { name, count }) => {
                assert_eq!(name, "A");
                assert_eq!(count, 2);
            }
            other => panic!("expected ambiguity error, got {other:?}"),
        }
    }
}
