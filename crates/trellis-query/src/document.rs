//! Document handle
//!
//! A [`Document`] owns one arena. Every [`Selection`] keeps a handle to the
//! document it was taken from, and fragments created later (`add(markup)`,
//! [`Document::fragment`]) land in the same arena as detached roots.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use trellis_css::SelectorList;
use trellis_dom::{DomTree, Node, NodeId, NodeType};
use trellis_html::{HtmlParser, ParserConfig};

use crate::{QueryError, Result, Selection, Target};

/// Shared, single-threaded handle to a parsed tree
///
/// Cloning is cheap and yields a handle to the same tree.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Rc<RefCell<DomTree>>,
    parser: HtmlParser,
}

impl Document {
    /// Parse a full HTML document
    pub fn load(html: &str) -> Result<Self> {
        Self::load_with(html, &ParserConfig::default())
    }

    /// Parse a full HTML document with explicit parser options
    pub fn load_with(html: &str, config: &ParserConfig) -> Result<Self> {
        let parser = HtmlParser::with_config(config.clone());
        let tree = parser.parse(html)?;
        tracing::debug!("Loaded document with {} nodes", tree.len());
        Ok(Self {
            tree: Rc::new(RefCell::new(tree)),
            parser,
        })
    }

    /// Wrap an existing tree
    pub fn from_tree(tree: DomTree) -> Self {
        Self {
            tree: Rc::new(RefCell::new(tree)),
            parser: HtmlParser::new(),
        }
    }

    /// True if both handles point at the same tree
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }

    /// Selection holding just the document node
    pub fn root(&self) -> Selection {
        Selection::new(self.clone(), vec![NodeId::ROOT], None)
    }

    /// Empty selection with no chain parent
    pub fn empty(&self) -> Selection {
        Selection::new(self.clone(), Vec::new(), None)
    }

    /// All elements of the document matching a selector, in document order
    pub fn select(&self, selector: &str) -> Result<Selection> {
        let list = SelectorList::parse_relative(selector)?;
        let nodes = self.with_tree(|tree| list.query_all(tree, NodeId::ROOT));
        tracing::trace!("select({selector:?}): {} nodes", nodes.len());
        Ok(Selection::new(self.clone(), nodes, None))
    }

    /// Elements matching a selector below every node of `context`
    ///
    /// A markup context is parsed into this document first.
    pub fn select_in<'a>(&self, selector: &str, context: impl Into<Target<'a>>) -> Result<Selection> {
        let list = SelectorList::parse_relative(selector)?;
        let scopes = self.resolve(context.into())?;
        let nodes = self.with_tree(|tree| {
            dedup(
                scopes
                    .iter()
                    .flat_map(|&scope| list.query_all(tree, scope)),
            )
        });
        Ok(Selection::new(self.clone(), nodes, None))
    }

    /// Parse markup into detached nodes of this document
    pub fn fragment(&self, markup: &str) -> Result<Selection> {
        let nodes = self.parse_fragment(markup)?;
        Ok(Selection::new(self.clone(), nodes, None))
    }

    /// Selection over known nodes, duplicates dropped
    pub fn wrap(&self, nodes: impl IntoIterator<Item = NodeId>) -> Result<Selection> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        self.check_nodes(&nodes)?;
        Ok(Selection::new(self.clone(), dedup(nodes), None))
    }

    /// Run `f` with read access to the tree
    ///
    /// `f` must not call back into methods that modify this document.
    pub fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.tree.borrow())
    }

    pub(crate) fn with_tree_mut<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> R {
        f(&mut self.tree.borrow_mut())
    }

    /// Attribute value of an element
    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_tree(|tree| tree.attr(node, name).map(str::to_string))
    }

    /// Tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.with_tree(|tree| tree.get(node).and_then(Node::tag_name).map(str::to_string))
    }

    pub fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.with_tree(|tree| tree.get(node).map(Node::node_type))
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.with_tree(|tree| tree.is_element(node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.with_tree(|tree| tree.parent(node))
    }

    /// Concatenated text below a node
    pub fn text(&self, node: NodeId) -> String {
        self.with_tree(|tree| tree.text_content(node))
    }

    pub(crate) fn parse_fragment(&self, markup: &str) -> Result<Vec<NodeId>> {
        let parser = &self.parser;
        let nodes = self.with_tree_mut(|tree| parser.parse_fragment_into(tree, markup))?;
        Ok(nodes)
    }

    /// Reject ids that do not belong to this arena
    pub(crate) fn check_nodes(&self, nodes: &[NodeId]) -> Result<()> {
        self.with_tree(|tree| match nodes.iter().find(|&&id| !tree.contains_id(id)) {
            Some(id) => Err(QueryError::InvalidArgument(format!(
                "node {id} does not belong to this document"
            ))),
            None => Ok(()),
        })
    }

    pub(crate) fn check_selection(&self, sel: &Selection) -> Result<()> {
        if sel.document().ptr_eq(self) {
            Ok(())
        } else {
            Err(QueryError::InvalidArgument(
                "selection belongs to another document".to_string(),
            ))
        }
    }

    /// Nodes a target stands for
    ///
    /// Selectors are matched against the whole document; markup is parsed
    /// into new detached nodes.
    pub(crate) fn resolve(&self, target: Target<'_>) -> Result<Vec<NodeId>> {
        match target {
            Target::Selector(text) => Ok(self.select(text)?.to_vec()),
            Target::Markup(markup) => self.parse_fragment(markup),
            Target::Node(id) => {
                self.check_nodes(&[id])?;
                Ok(vec![id])
            }
            Target::Nodes(ids) => {
                self.check_nodes(ids)?;
                Ok(ids.to_vec())
            }
            Target::Selection(sel) => {
                self.check_selection(sel)?;
                Ok(sel.to_vec())
            }
        }
    }
}

/// Drop repeated ids, keeping first occurrences
pub(crate) fn dedup(nodes: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    nodes.into_iter().filter(|&id| seen.insert(id)).collect()
}
