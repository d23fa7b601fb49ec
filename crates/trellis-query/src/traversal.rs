//! Tree traversal
//!
//! Every operation returns a new [`Selection`] chained to the one it was
//! called on. Results never repeat a node: the first occurrence wins.
//! Optional `filter` selectors are matched against each result node itself,
//! never against its contents.

use std::collections::HashSet;

use trellis_css::SelectorList;
use trellis_dom::{DomTree, NodeId};

use crate::document::dedup;
use crate::{Boundary, Result, Selection, Target};

/// Where an `*_until` walk stops
enum Stop {
    Never,
    Selector(SelectorList),
    Nodes(HashSet<NodeId>),
}

impl Stop {
    fn hit(&self, tree: &DomTree, node: NodeId) -> bool {
        match self {
            Stop::Never => false,
            Stop::Selector(list) => list.matches(tree, node),
            Stop::Nodes(nodes) => nodes.contains(&node),
        }
    }
}

fn parse_filter(filter: Option<&str>) -> Result<Option<SelectorList>> {
    Ok(filter.map(SelectorList::parse).transpose()?)
}

impl Selection {
    /// Descendants of the selected nodes
    ///
    /// A selector is matched below each node (`> li` is allowed). Nodes and
    /// selections are kept only when some selected node contains them.
    pub fn find<'a>(&self, target: impl Into<Target<'a>>) -> Result<Selection> {
        let doc = self.document();
        let nodes = match target.into() {
            Target::Selector(text) => {
                let list = SelectorList::parse_relative(text)?;
                doc.with_tree(|tree| {
                    dedup(self.iter().flat_map(|scope| list.query_all(tree, scope)))
                })
            }
            target @ Target::Markup(_) => return Err(target.unsupported("find")),
            target => {
                let candidates = doc.resolve(target)?;
                doc.with_tree(|tree| {
                    dedup(
                        candidates
                            .into_iter()
                            .filter(|&node| self.iter().any(|scope| tree.contains(scope, node))),
                    )
                })
            }
        };
        Ok(self.derive("find", nodes))
    }

    /// Every element below the selected nodes, in document order
    ///
    /// This is `find` without an argument. Only elements are returned;
    /// text and comment nodes are reached through [`Selection::contents`].
    pub fn descendants(&self) -> Selection {
        let nodes = self.document().with_tree(|tree| {
            dedup(
                self.iter()
                    .flat_map(|node| tree.descendants(node))
                    .filter(|&node| tree.is_element(node)),
            )
        });
        self.derive("descendants", nodes)
    }

    /// Element children
    pub fn children(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("children", self.iter(), filter, |tree, node| {
            tree.element_children(node).collect()
        })
    }

    /// All children, text and comments included
    pub fn contents(&self) -> Selection {
        let nodes: Vec<NodeId> = self
            .document()
            .with_tree(|tree| self.iter().flat_map(|node| tree.children(node)).collect());
        self.derive("contents", nodes)
    }

    /// Next element sibling
    pub fn next(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("next", self.iter(), filter, |tree, node| {
            tree.following_siblings(node)
                .find(|&sibling| tree.is_element(sibling))
                .into_iter()
                .collect()
        })
    }

    /// Previous element sibling
    pub fn prev(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("prev", self.iter(), filter, |tree, node| {
            tree.preceding_siblings(node)
                .find(|&sibling| tree.is_element(sibling))
                .into_iter()
                .collect()
        })
    }

    /// Every following element sibling
    pub fn next_all(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("next_all", self.iter(), filter, |tree, node| {
            tree.following_siblings(node)
                .filter(|&sibling| tree.is_element(sibling))
                .collect()
        })
    }

    /// Every preceding element sibling, nearest first
    pub fn prev_all(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("prev_all", self.iter(), filter, |tree, node| {
            tree.preceding_siblings(node)
                .filter(|&sibling| tree.is_element(sibling))
                .collect()
        })
    }

    /// Following element siblings up to, not including, the boundary
    pub fn next_until<'a>(
        &self,
        boundary: impl Into<Boundary<'a>>,
        filter: Option<&str>,
    ) -> Result<Selection> {
        let stop = self.stop_at(boundary.into())?;
        self.relatives("next_until", self.iter(), filter, |tree, node| {
            tree.following_siblings(node)
                .take_while(|&sibling| !stop.hit(tree, sibling))
                .filter(|&sibling| tree.is_element(sibling))
                .collect()
        })
    }

    /// Preceding element siblings up to, not including, the boundary
    pub fn prev_until<'a>(
        &self,
        boundary: impl Into<Boundary<'a>>,
        filter: Option<&str>,
    ) -> Result<Selection> {
        let stop = self.stop_at(boundary.into())?;
        self.relatives("prev_until", self.iter(), filter, |tree, node| {
            tree.preceding_siblings(node)
                .take_while(|&sibling| !stop.hit(tree, sibling))
                .filter(|&sibling| tree.is_element(sibling))
                .collect()
        })
    }

    /// Other element children of each node's parent
    pub fn siblings(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("siblings", self.iter(), filter, |tree, node| match tree.parent(node) {
            Some(parent) => tree
                .element_children(parent)
                .filter(|&sibling| sibling != node)
                .collect(),
            None => Vec::new(),
        })
    }

    /// Parent elements (the document node is never returned)
    pub fn parent(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("parent", self.iter(), filter, |tree, node| {
            tree.parent(node)
                .filter(|&parent| tree.is_element(parent))
                .into_iter()
                .collect()
        })
    }

    /// Ancestor elements
    ///
    /// For one node this is nearest first. Several nodes are walked last to
    /// first, so the ancestors of later nodes come out ahead.
    pub fn parents(&self, filter: Option<&str>) -> Result<Selection> {
        self.relatives("parents", self.iter().rev(), filter, |tree, node| {
            tree.ancestors(node)
                .filter(|&ancestor| tree.is_element(ancestor))
                .collect()
        })
    }

    /// Ancestor elements up to, not including, the boundary
    pub fn parents_until<'a>(
        &self,
        boundary: impl Into<Boundary<'a>>,
        filter: Option<&str>,
    ) -> Result<Selection> {
        let stop = self.stop_at(boundary.into())?;
        self.relatives("parents_until", self.iter().rev(), filter, |tree, node| {
            tree.ancestors(node)
                .take_while(|&ancestor| !stop.hit(tree, ancestor))
                .filter(|&ancestor| tree.is_element(ancestor))
                .collect()
        })
    }

    /// First of self and ancestors matching the selector
    ///
    /// Without a selector the result is empty.
    pub fn closest(&self, selector: Option<&str>) -> Result<Selection> {
        let Some(text) = selector else {
            return Ok(self.derive("closest", Vec::new()));
        };
        let list = SelectorList::parse(text)?;
        self.relatives("closest", self.iter(), None, |tree, node| {
            std::iter::once(node)
                .chain(tree.ancestors(node))
                .find(|&candidate| list.matches(tree, candidate))
                .into_iter()
                .collect()
        })
    }

    /// Collect `walk` over `inputs`, dedup, then filter
    fn relatives(
        &self,
        op: &str,
        inputs: impl Iterator<Item = NodeId>,
        filter: Option<&str>,
        walk: impl Fn(&DomTree, NodeId) -> Vec<NodeId>,
    ) -> Result<Selection> {
        let filter = parse_filter(filter)?;
        let nodes = self.document().with_tree(|tree| {
            let found = dedup(inputs.flat_map(|node| walk(tree, node)));
            match &filter {
                Some(list) => found
                    .into_iter()
                    .filter(|&node| list.matches(tree, node))
                    .collect(),
                None => found,
            }
        });
        Ok(self.derive(op, nodes))
    }

    fn stop_at(&self, boundary: Boundary<'_>) -> Result<Stop> {
        Ok(match boundary {
            Boundary::Unbounded => Stop::Never,
            Boundary::Selector(text) => Stop::Selector(SelectorList::parse(text)?),
            Boundary::Node(id) => {
                self.document().check_nodes(&[id])?;
                Stop::Nodes(HashSet::from([id]))
            }
            Boundary::Selection(sel) => {
                self.document().check_selection(sel)?;
                Stop::Nodes(sel.iter().collect())
            }
        })
    }
}
