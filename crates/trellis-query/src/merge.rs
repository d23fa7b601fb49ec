//! Set union in document order

use trellis_dom::{DomTree, NodeId};

use crate::document::dedup;
use crate::{Result, Selection, Target};

impl Selection {
    /// Union with `target`, sorted into document order
    ///
    /// Markup is parsed into new detached nodes of this document.
    pub fn add<'a>(&self, target: impl Into<Target<'a>>) -> Result<Selection> {
        let extra = self.document().resolve(target.into())?;
        Ok(self.merge("add", extra))
    }

    /// Union with the matches of `selector` below `context`
    pub fn add_in<'a>(&self, selector: &str, context: impl Into<Target<'a>>) -> Result<Selection> {
        let extra = self.document().select_in(selector, context)?;
        Ok(self.merge("add", extra.to_vec()))
    }

    /// Union with the previous selection of the chain, optionally filtered
    pub fn add_back(&self, filter: Option<&str>) -> Result<Selection> {
        let prev = self.end();
        let prev = match filter {
            Some(selector) => prev.filter(selector)?,
            None => prev,
        };
        Ok(self.merge("add_back", prev.to_vec()))
    }

    fn merge(&self, op: &str, extra: Vec<NodeId>) -> Selection {
        let mut nodes = dedup(self.iter().chain(extra));
        self.document()
            .with_tree(|tree| sort_document_order(tree, &mut nodes));
        self.derive(op, nodes)
    }
}

/// Sort nodes into document order
///
/// Nodes under different roots are grouped by root, oldest root first.
pub(crate) fn sort_document_order(tree: &DomTree, nodes: &mut [NodeId]) {
    nodes.sort_by(|&a, &b| {
        tree.compare_document_position(a, b)
            .unwrap_or_else(|| tree.root_of(a).cmp(&tree.root_of(b)))
    });
}
