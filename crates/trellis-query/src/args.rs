//! Operation arguments
//!
//! Operations that accept "a selector, some nodes or another selection"
//! take one of these tagged enums. `From` impls let callers pass the plain
//! value (`"li"`, a [`NodeId`], `&selection`).

use std::fmt;

use trellis_dom::NodeId;

use crate::{QueryError, Selection};

/// Something that resolves to a set of nodes
#[derive(Clone, Copy)]
pub enum Target<'a> {
    /// Selector text, matched against the document
    Selector(&'a str),
    /// Markup, parsed into new detached nodes
    Markup(&'a str),
    Node(NodeId),
    Nodes(&'a [NodeId]),
    Selection(&'a Selection),
}

impl Target<'_> {
    /// Variant name used in error messages
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Target::Selector(_) => "selector",
            Target::Markup(_) => "markup",
            Target::Node(_) => "node",
            Target::Nodes(_) => "node list",
            Target::Selection(_) => "selection",
        }
    }

    pub(crate) fn unsupported(&self, op: &str) -> QueryError {
        QueryError::InvalidArgument(format!("{op} does not accept a {}", self.kind()))
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Selector(text) => f.debug_tuple("Selector").field(text).finish(),
            Target::Markup(text) => f.debug_tuple("Markup").field(text).finish(),
            Target::Node(id) => f.debug_tuple("Node").field(id).finish(),
            Target::Nodes(ids) => f.debug_tuple("Nodes").field(ids).finish(),
            Target::Selection(sel) => f.debug_tuple("Selection").field(&sel.nodes()).finish(),
        }
    }
}

/// Text that looks like markup becomes [`Target::Markup`]
impl<'a> From<&'a str> for Target<'a> {
    fn from(text: &'a str) -> Self {
        if trellis_html::is_html(text) {
            Target::Markup(text)
        } else {
            Target::Selector(text)
        }
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(text: &'a String) -> Self {
        Target::from(text.as_str())
    }
}

impl From<NodeId> for Target<'_> {
    fn from(id: NodeId) -> Self {
        Target::Node(id)
    }
}

impl<'a> From<&'a [NodeId]> for Target<'a> {
    fn from(ids: &'a [NodeId]) -> Self {
        Target::Nodes(ids)
    }
}

impl<'a> From<&'a Vec<NodeId>> for Target<'a> {
    fn from(ids: &'a Vec<NodeId>) -> Self {
        Target::Nodes(ids)
    }
}

impl<'a, const N: usize> From<&'a [NodeId; N]> for Target<'a> {
    fn from(ids: &'a [NodeId; N]) -> Self {
        Target::Nodes(ids)
    }
}

impl<'a> From<&'a Selection> for Target<'a> {
    fn from(sel: &'a Selection) -> Self {
        Target::Selection(sel)
    }
}

/// Per-node test for `filter`, `not` and `is`
pub enum Matcher<'a> {
    Target(Target<'a>),
    /// Called with `(index, node)`; `true` keeps the node
    Predicate(Box<dyn FnMut(usize, NodeId) -> bool + 'a>),
}

impl<'a> Matcher<'a> {
    /// Wrap a closure
    pub fn predicate(f: impl FnMut(usize, NodeId) -> bool + 'a) -> Self {
        Matcher::Predicate(Box::new(f))
    }
}

impl<'a> From<Target<'a>> for Matcher<'a> {
    fn from(target: Target<'a>) -> Self {
        Matcher::Target(target)
    }
}

impl<'a> From<&'a str> for Matcher<'a> {
    fn from(text: &'a str) -> Self {
        Matcher::Target(text.into())
    }
}

impl From<NodeId> for Matcher<'_> {
    fn from(id: NodeId) -> Self {
        Matcher::Target(id.into())
    }
}

impl<'a> From<&'a [NodeId]> for Matcher<'a> {
    fn from(ids: &'a [NodeId]) -> Self {
        Matcher::Target(ids.into())
    }
}

impl<'a> From<&'a Vec<NodeId>> for Matcher<'a> {
    fn from(ids: &'a Vec<NodeId>) -> Self {
        Matcher::Target(ids.into())
    }
}

impl<'a> From<&'a Selection> for Matcher<'a> {
    fn from(sel: &'a Selection) -> Self {
        Matcher::Target(sel.into())
    }
}

/// Where `*_until` walks stop
#[derive(Clone, Copy, Debug, Default)]
pub enum Boundary<'a> {
    /// Walk to the end
    #[default]
    Unbounded,
    Selector(&'a str),
    Node(NodeId),
    /// Stop at any member
    Selection(&'a Selection),
}

impl<'a> From<&'a str> for Boundary<'a> {
    fn from(text: &'a str) -> Self {
        Boundary::Selector(text)
    }
}

impl<'a> From<Option<&'a str>> for Boundary<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Boundary::Unbounded, Boundary::Selector)
    }
}

impl From<NodeId> for Boundary<'_> {
    fn from(id: NodeId) -> Self {
        Boundary::Node(id)
    }
}

impl<'a> From<&'a Selection> for Boundary<'a> {
    fn from(sel: &'a Selection) -> Self {
        Boundary::Selection(sel)
    }
}

/// Iteration control returned by `each` callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

/// `false` stops, as in `return idx < 1`
impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going { Flow::Continue } else { Flow::Stop }
    }
}
