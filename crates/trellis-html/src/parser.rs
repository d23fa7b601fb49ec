//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the arena tree.

use html5ever::{local_name, ns, parse_document, parse_fragment, QualName};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use trellis_dom::{DomTree, Node, NodeId};

use crate::{ParseError, ParserConfig};

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: ParserConfig,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with explicit options
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse HTML string into a document tree
    ///
    /// html5ever always synthesizes `html`, `head` and `body`.
    pub fn parse(&self, html: &str) -> Result<DomTree, ParseError> {
        tracing::debug!("Parsing HTML document ({} bytes)", html.len());

        let dom = Self::read(html)?;
        let mut tree = DomTree::new();
        for child in dom.document.children.borrow().iter() {
            self.convert_node(child, &mut tree, Some(NodeId::ROOT));
        }

        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }

    /// Parse markup and graft its top-level nodes into `tree` as detached roots
    ///
    /// The markup is parsed as the contents of a `template` element, so
    /// table parts (`<tr>`, `<td>`) and head-only tags keep their elements.
    pub fn parse_fragment_into(
        &self,
        tree: &mut DomTree,
        html: &str,
    ) -> Result<Vec<NodeId>, ParseError> {
        tracing::debug!("Parsing HTML fragment ({} bytes)", html.len());

        let context = QualName::new(None, ns!(html), local_name!("template"));
        let dom = parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false)
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        // The fragment's nodes hang off a synthesized `html` element
        let mut roots = Vec::new();
        for holder in dom.document.children.borrow().iter() {
            for child in holder.children.borrow().iter() {
                if let Some(id) = self.convert_node(child, tree, None) {
                    roots.push(id);
                }
            }
        }

        tracing::debug!("Fragment produced {} top-level nodes", roots.len());
        Ok(roots)
    }

    fn read(html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Convert an RcDom node (and its subtree) into the arena
    ///
    /// Returns the new id, or `None` when the configuration drops the node.
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: Option<NodeId>) -> Option<NodeId> {
        let node = match &handle.data {
            RcNodeData::Document => {
                // Only reachable for nested documents; splice the children
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return None;
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                if !self.config.keep_doctype {
                    return None;
                }
                Node::doctype(name, public_id, system_id)
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !self.config.keep_whitespace_text && text.trim().is_empty() {
                    return None;
                }
                Node::text(text)
            }
            RcNodeData::Comment { contents } => {
                if !self.config.keep_comments {
                    return None;
                }
                Node::comment(contents.to_string())
            }
            RcNodeData::Element { name, attrs, .. } => {
                let mut node = Node::element(&name.local);
                if let Some(elem) = node.as_element_mut() {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, attr.value.to_string());
                    }
                }
                node
            }
            RcNodeData::ProcessingInstruction { target, contents } => {
                Node::processing_instruction(target, contents)
            }
        };

        let id = tree.push(node);
        if let Some(parent) = parent {
            tree.append_child(parent, id);
        }

        if matches!(handle.data, RcNodeData::Element { .. }) {
            for child in handle.children.borrow().iter() {
                self.convert_node(child, tree, Some(id));
            }
        }
        Some(id)
    }
}
