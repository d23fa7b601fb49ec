//! DOM Tree (arena-based allocation)

use std::cmp::Ordering;

use crate::tree_walker::Direction;
use crate::{Ancestors, Children, Descendants, Node, NodeId, Siblings};

/// Arena-based DOM tree
///
/// Index 0 is always the document node. Nodes that are never attached (or
/// that were detached) act as additional roots living in the same arena.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Check that an id belongs to this arena
    pub fn contains_id(&self, id: NodeId) -> bool {
        id.is_valid() && id.index() < self.nodes.len()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Push a detached node into the arena
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::doctype(name, public_id, system_id))
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains_id(parent)
            || !self.contains_id(child)
            || parent == child
            || self.contains(child, parent)
        {
            tracing::warn!("append_child({parent}, {child}) ignored");
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent and siblings; its subtree stays intact
    pub fn detach(&mut self, id: NodeId) {
        if !self.contains_id(id) {
            return;
        }
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.to_option()
    }

    /// First child of a node
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.to_option()
    }

    /// Last child of a node
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.last_child.to_option()
    }

    /// Next sibling of a node
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.to_option()
    }

    /// Previous sibling of a node
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling.to_option()
    }

    /// Check whether a node is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Element children of a node
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|&c| self.is_element(c))
    }

    /// Ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Pre-order descendants (excluding `id`)
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.first_child(id).unwrap_or(NodeId::NONE),
        }
    }

    /// Siblings after `id`, nearest first
    pub fn following_siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.next_sibling(id).unwrap_or(NodeId::NONE),
            direction: Direction::Forward,
        }
    }

    /// Siblings before `id`, nearest first
    pub fn preceding_siblings(&self, id: NodeId) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.prev_sibling(id).unwrap_or(NodeId::NONE),
            direction: Direction::Backward,
        }
    }

    /// True if `node` is a strict descendant of `ancestor`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor != node && self.ancestors(node).any(|a| a == ancestor)
    }

    /// Topmost ancestor of a node (the node itself when detached)
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Position of an element among its parent's element children
    pub fn element_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.element_children(parent).position(|c| c == id)
    }

    /// Order two nodes by document order
    ///
    /// Returns `None` when they do not share a root.
    pub fn compare_document_position(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }

        let mut path_a: Vec<NodeId> = self.ancestors(a).collect();
        path_a.reverse();
        path_a.push(a);
        let mut path_b: Vec<NodeId> = self.ancestors(b).collect();
        path_b.reverse();
        path_b.push(b);

        if path_a[0] != path_b[0] {
            return None;
        }

        let shared = path_a
            .iter()
            .zip(&path_b)
            .take_while(|(x, y)| x == y)
            .count();

        // One path is a prefix of the other: the ancestor comes first
        if shared == path_a.len() {
            return Some(Ordering::Less);
        }
        if shared == path_b.len() {
            return Some(Ordering::Greater);
        }

        let (branch_a, branch_b) = (path_a[shared], path_b[shared]);
        let parent = path_a[shared - 1];
        for child in self.children(parent) {
            if child == branch_a {
                return Some(Ordering::Less);
            }
            if child == branch_b {
                return Some(Ordering::Greater);
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Look up an attribute on an element
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Set an attribute on an element; returns false for non-elements
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id).and_then(Node::as_element_mut) {
            Some(elem) => {
                elem.set_attr(name, value);
                true
            }
            None => false,
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
