//! Tree walking
//!
//! Iterators over the structural links of a [`DomTree`]. They only follow
//! links and never allocate, so walking a tree is O(visited nodes).

use crate::{DomTree, NodeId};

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Text,
    ProcessingInstruction,
    Comment,
    Document,
    DocumentType,
}

impl NodeType {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            _ => None,
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            NodeType::Element => 1,
            NodeType::Text => 3,
            NodeType::ProcessingInstruction => 7,
            NodeType::Comment => 8,
            NodeType::Document => 9,
            NodeType::DocumentType => 10,
        }
    }

    /// Lowercase name (`"element"`, `"text"`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::ProcessingInstruction => "processing-instruction",
            NodeType::Comment => "comment",
            NodeType::Document => "document",
            NodeType::DocumentType => "doctype",
        }
    }
}

/// Direct children of a node, first to last
pub struct Children<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.tree.next_sibling(current).unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Sibling direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Siblings after (or before) a node, walking away from it
pub struct Siblings<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) next: NodeId,
    pub(crate) direction: Direction,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        let following = match self.direction {
            Direction::Forward => self.tree.next_sibling(current),
            Direction::Backward => self.tree.prev_sibling(current),
        };
        self.next = following.unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Ancestors of a node, nearest first (the node itself is excluded)
pub struct Ancestors<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.tree.parent(current).unwrap_or(NodeId::NONE);
        Some(current)
    }
}

/// Pre-order walk of a subtree, excluding its root
pub struct Descendants<'a> {
    pub(crate) tree: &'a DomTree,
    pub(crate) root: NodeId,
    pub(crate) next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;

        // Descend first, otherwise climb until a next sibling shows up
        self.next = match self.tree.first_child(current) {
            Some(child) => child,
            None => {
                let mut cursor = current;
                loop {
                    if cursor == self.root {
                        break NodeId::NONE;
                    }
                    if let Some(sibling) = self.tree.next_sibling(cursor) {
                        break sibling;
                    }
                    match self.tree.parent(cursor) {
                        Some(parent) if parent != self.root => cursor = parent,
                        _ => break NodeId::NONE,
                    }
                }
            }
        };

        Some(current)
    }
}
