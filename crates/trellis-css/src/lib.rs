//! trellis Selectors & Inline Styles
//!
//! Selector parsing and matching over [`DomTree`] nodes, plus the codec for
//! `style` attribute text.

mod matching;
mod selectors;
mod style;

pub use selectors::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthExpression,
    PseudoClass, SelectorList, SimpleSelector,
};
pub use style::StyleDeclarations;

use trellis_dom::{DomTree, NodeId};

/// Check whether `node` matches a selector
pub fn matches(tree: &DomTree, node: NodeId, selector: &str) -> Result<bool, SelectorError> {
    Ok(SelectorList::parse(selector)?.matches(tree, node))
}

/// Every descendant of `root` matching a selector, in document order
///
/// Relative selectors (`> li`) are anchored at `root`.
pub fn query_all(tree: &DomTree, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
    Ok(SelectorList::parse_relative(selector)?.query_all(tree, root))
}

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,
    #[error("Unexpected {token:?} at offset {offset}")]
    UnexpectedToken { token: char, offset: usize },
    #[error("unmatched pseudo-class :{0}")]
    UnmatchedPseudoClass(String),
    #[error("Unexpected end of selector")]
    UnexpectedEnd,
    #[error("Invalid nth expression {0:?}")]
    InvalidNth(String),
}
