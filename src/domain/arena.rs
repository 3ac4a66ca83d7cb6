//! Arena-backed left-child/right-sibling tree.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Data payload for tree nodes: a tag name on containers, text on leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub label: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Tree node in the arena-based document structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of the first child, None for leaves
    pub first_child: Option<Index>,
    /// Index of the next node under the same parent
    pub next_sibling: Option<Index>,
}

impl TreeNode {
    /// A node without children holds text rather than a tag.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// Arena-based document tree.
///
/// Every node is owned by the arena; `first_child` and `next_sibling` are
/// indices into it. Splices re-link indices and never copy subtrees, and
/// nodes dropped by a splice are removed from the arena so stale indices
/// resolve to `None`.
#[derive(Debug)]
pub struct DomTree {
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty documents
    root: Option<Index>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Allocate a detached node.
    #[instrument(level = "trace", skip(self, label))]
    pub(crate) fn alloc(&mut self, label: impl Into<String>) -> Index {
        self.arena.insert(TreeNode {
            data: NodeData {
                label: label.into(),
            },
            first_child: None,
            next_sibling: None,
        })
    }

    pub(crate) fn insert_root(&mut self, label: impl Into<String>) -> Index {
        let idx = self.alloc(label);
        self.root = Some(idx);
        idx
    }

    /// Link `child` as the last element of `parent`'s children chain.
    ///
    /// Walks the existing chain to its tail, so appends cost O(siblings).
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn append_child(&mut self, parent: Index, child: Index) {
        match self.first_child(parent) {
            None => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.first_child = Some(child);
                }
            }
            Some(head) => {
                let tail = self.chain_tail(head);
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next_sibling = Some(child);
                }
            }
        }
    }

    /// Last node of the sibling chain starting at `head`.
    pub(crate) fn chain_tail(&self, head: Index) -> Index {
        let mut tail = head;
        while let Some(next) = self.next_sibling(tail) {
            tail = next;
        }
        tail
    }

    /// Sibling immediately before `node` in `parent`'s chain, None if `node`
    /// is the first child (or not a child of `parent` at all).
    pub(crate) fn previous_sibling(&self, parent: Index, node: Index) -> Option<Index> {
        let mut cursor = self.first_child(parent)?;
        while let Some(next) = self.next_sibling(cursor) {
            if next == node {
                return Some(cursor);
            }
            cursor = next;
        }
        None
    }

    /// Replace `old` in `parent`'s chain by the chain starting at `head`.
    ///
    /// `prev` is the sibling before `old` (None when `old` is the first
    /// child). The tail of the new chain takes over `old`'s next sibling, and
    /// `old` itself is dropped from the arena. Returns the node now occupying
    /// `old`'s position.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn splice(
        &mut self,
        parent: Index,
        prev: Option<Index>,
        old: Index,
        head: Option<Index>,
    ) -> Option<Index> {
        let after = self.next_sibling(old);
        let replacement = match head {
            Some(head) => {
                let tail = self.chain_tail(head);
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next_sibling = after;
                }
                Some(head)
            }
            None => after,
        };

        let link = match prev {
            Some(prev) => self.arena.get_mut(prev).map(|n| &mut n.next_sibling),
            None => self.arena.get_mut(parent).map(|n| &mut n.first_child),
        };
        if let Some(link) = link {
            *link = replacement;
        }

        self.arena.remove(old);
        replacement
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn label(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|n| n.data.label.as_str())
    }

    pub fn is_leaf(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(TreeNode::is_leaf)
    }

    pub fn first_child(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|n| n.first_child)
    }

    pub fn next_sibling(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|n| n.next_sibling)
    }

    /// Iterate over the children chain of `parent`.
    pub fn children(&self, parent: Index) -> ChildIterator<'_> {
        ChildIterator {
            tree: self,
            next: self.first_child(parent),
        }
    }

    /// Pre-order iteration: node, then its children, then its siblings.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(next) = self.next_sibling(idx) {
                stack.push((next, depth));
            }
            if let Some(child) = self.first_child(idx) {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Text of every leaf in document order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_texts(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.data.label.clone())
            .collect()
    }

    /// Number of nodes whose label equals `label`, leaves included.
    pub fn count_label(&self, label: &str) -> usize {
        self.iter()
            .filter(|(_, node)| node.data.label == label)
            .count()
    }
}

pub struct ChildIterator<'a> {
    tree: &'a DomTree,
    next: Option<Index>,
}

impl<'a> Iterator for ChildIterator<'a> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a DomTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Sibling goes below the child so the whole subtree comes first
                if let Some(next) = node.next_sibling {
                    self.stack.push(next);
                }
                if let Some(child) = node.first_child {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
