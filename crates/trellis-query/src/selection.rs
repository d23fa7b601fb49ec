//! Selection and chain history
//!
//! A [`Selection`] is an immutable, reference-counted list of node ids.
//! Every derived selection remembers the one it came from, so
//! [`Selection::end`] hands back that exact object.

use std::fmt;
use std::rc::Rc;

use trellis_dom::NodeId;

use crate::{Document, Matcher, Result};

/// Ordered, duplicate-free set of nodes from one [`Document`]
#[derive(Clone)]
pub struct Selection(Rc<Inner>);

struct Inner {
    document: Document,
    nodes: Vec<NodeId>,
    prev: Option<Selection>,
}

impl Selection {
    pub(crate) fn new(document: Document, nodes: Vec<NodeId>, prev: Option<Selection>) -> Self {
        Self(Rc::new(Inner {
            document,
            nodes,
            prev,
        }))
    }

    /// New selection whose chain parent is `self`
    pub(crate) fn derive(&self, op: &str, nodes: Vec<NodeId>) -> Selection {
        tracing::trace!("{op}: {} -> {} nodes", self.len(), nodes.len());
        Selection::new(self.document().clone(), nodes, Some(self.clone()))
    }

    pub fn document(&self) -> &Document {
        &self.0.document
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0.nodes
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.0.nodes.clone()
    }

    pub fn len(&self) -> usize {
        self.0.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.nodes.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, NodeId>> {
        self.0.nodes.iter().copied()
    }

    /// True if both values are the same selection object
    pub fn ptr_eq(&self, other: &Selection) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The selection this one was derived from
    ///
    /// At the start of a chain this is an empty selection, and so on forever.
    pub fn end(&self) -> Selection {
        match &self.0.prev {
            Some(prev) => prev.clone(),
            None => self.document().empty(),
        }
    }

    /// Node at `index`; negative indices count from the end
    pub fn get(&self, index: isize) -> Option<NodeId> {
        let index = if index < 0 {
            self.len().checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        self.0.nodes.get(index).copied()
    }

    /// Single-node selection at `index` (empty when out of range)
    pub fn eq(&self, index: isize) -> Selection {
        let nodes = self.get(index).into_iter().collect();
        self.derive("eq", nodes)
    }

    pub fn first(&self) -> Selection {
        self.eq(0)
    }

    pub fn last(&self) -> Selection {
        self.eq(-1)
    }

    /// Nodes in `[start, end)`, with array-slice index rules
    pub fn slice(&self, start: isize, end: Option<isize>) -> Selection {
        let len = self.len();
        let clamp = |index: isize| {
            if index < 0 {
                len.saturating_sub(index.unsigned_abs())
            } else {
                (index as usize).min(len)
            }
        };
        let start = clamp(start);
        let end = end.map_or(len, clamp);
        let nodes = if start < end {
            self.0.nodes[start..end].to_vec()
        } else {
            Vec::new()
        };
        self.derive("slice", nodes)
    }

    /// True if any node passes the matcher
    pub fn is<'a>(&self, matcher: impl Into<Matcher<'a>>) -> Result<bool> {
        Ok(self.test_each("is", matcher.into())?.into_iter().any(|keep| keep))
    }

    /// Attribute of the first node
    pub fn attr(&self, name: &str) -> Option<String> {
        self.get(0).and_then(|node| self.document().attr(node, name))
    }

    /// Combined text of every node
    pub fn text(&self) -> String {
        self.iter().map(|node| self.document().text(node)).collect()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("nodes", &self.0.nodes)
            .field("has_prev", &self.0.prev.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Values collected by [`Selection::map`]
///
/// Keeps the selection it was mapped from so chains can continue with
/// [`Mapped::end`].
#[derive(Debug, Clone)]
pub struct Mapped<T> {
    items: Vec<T>,
    prev: Selection,
}

impl<T> Mapped<T> {
    pub(crate) fn new(items: Vec<T>, prev: Selection) -> Self {
        Self { items, prev }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// The selection that was mapped
    pub fn end(&self) -> Selection {
        self.prev.clone()
    }
}

impl Mapped<NodeId> {
    /// Turn mapped nodes back into a selection chained to the mapped one
    pub fn into_selection(self) -> Result<Selection> {
        self.prev.document().check_nodes(&self.items)?;
        let nodes = crate::document::dedup(self.items);
        Ok(self.prev.derive("map", nodes))
    }
}
