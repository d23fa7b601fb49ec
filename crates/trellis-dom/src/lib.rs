//! trellis DOM - Document Object Model
//!
//! Arena-based node tree. Nodes are addressed by [`NodeId`] and linked
//! through parent / child / sibling ids, so identity is id equality and
//! a tree can hold any number of detached roots next to the document.

mod node;
mod tree;
mod tree_walker;

pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use tree::DomTree;
pub use tree_walker::{Ancestors, Children, Descendants, NodeType, Siblings};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for an absent link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Build an id from an arena index
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// `Some(self)` unless this is [`NodeId::NONE`]
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
