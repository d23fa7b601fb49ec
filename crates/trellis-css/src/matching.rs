//! Selector matching against a [`DomTree`]
//!
//! Complex selectors are matched right to left: the last compound must
//! match the candidate, then each combinator walks towards the root
//! looking for an element that satisfies the compound on its left.

use trellis_dom::{DomTree, ElementData, Node, NodeId};

use crate::selectors::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass,
    SelectorList, SimpleSelector,
};

/// Elements whose `disabled` attribute makes them `:disabled`
const FORM_ELEMENTS: [&str; 7] = [
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

impl SelectorList {
    /// Check whether an element matches any selector in the list
    ///
    /// Relative entries never match without a scope.
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|sel| match_complex(tree, sel, node, None))
    }

    /// Check a candidate below `scope`
    ///
    /// Entries without a leading combinator are anchored as descendants of
    /// the scope, so every compound must match inside it.
    pub fn matches_in_scope(&self, tree: &DomTree, node: NodeId, scope: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|sel| match_complex(tree, sel, node, Some(scope)))
    }

    /// Matching descendants of `root`, in document order
    pub fn query_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .filter(|&node| self.matches_in_scope(tree, node, root))
            .collect()
    }
}

fn match_complex(tree: &DomTree, sel: &ComplexSelector, node: NodeId, scope: Option<NodeId>) -> bool {
    match sel.compounds.len().checked_sub(1) {
        Some(last) => match_from(tree, sel, last, node, scope),
        None => false,
    }
}

/// Match `compounds[index]` at `node`, then everything to its left
fn match_from(
    tree: &DomTree,
    sel: &ComplexSelector,
    index: usize,
    node: NodeId,
    scope: Option<NodeId>,
) -> bool {
    if !match_compound(tree, &sel.compounds[index], node) {
        return false;
    }

    if index == 0 {
        return match (sel.anchor, scope) {
            (anchor, Some(scope)) => {
                related(tree, anchor.unwrap_or(Combinator::Descendant), scope, node)
            }
            (None, None) => true,
            (Some(_), None) => false,
        };
    }

    let next = |candidate: NodeId| match_from(tree, sel, index - 1, candidate, scope);
    match sel.combinators[index - 1] {
        Combinator::Child => tree.parent(node).is_some_and(next),
        Combinator::Descendant => tree.ancestors(node).any(next),
        Combinator::NextSibling => prev_element(tree, node).is_some_and(next),
        Combinator::SubsequentSibling => tree
            .preceding_siblings(node)
            .filter(|&s| tree.is_element(s))
            .any(next),
    }
}

/// Check `left <combinator> right`
fn related(tree: &DomTree, combinator: Combinator, left: NodeId, right: NodeId) -> bool {
    match combinator {
        Combinator::Descendant => tree.contains(left, right),
        Combinator::Child => tree.parent(right) == Some(left),
        Combinator::NextSibling => prev_element(tree, right) == Some(left),
        Combinator::SubsequentSibling => tree.preceding_siblings(right).any(|s| s == left),
    }
}

fn prev_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.preceding_siblings(node).find(|&s| tree.is_element(s))
}

fn match_compound(tree: &DomTree, compound: &CompoundSelector, node: NodeId) -> bool {
    let Some(elem) = tree.get(node).and_then(Node::as_element) else {
        return false;
    };
    compound
        .parts
        .iter()
        .all(|part| match_simple(tree, part, node, elem))
}

fn match_simple(tree: &DomTree, part: &SimpleSelector, node: NodeId, elem: &ElementData) -> bool {
    match part {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(tag) => elem.name.eq_ignore_ascii_case(tag),
        SimpleSelector::Id(id) => elem.id() == Some(id.as_str()),
        SimpleSelector::Class(class) => elem.has_class(class),
        SimpleSelector::Attribute(attr) => match_attribute(attr, elem.get_attr(&attr.name)),
        SimpleSelector::PseudoClass(pseudo) => match_pseudo(tree, pseudo, node, elem),
    }
}

fn match_attribute(attr: &AttributeSelector, value: Option<&str>) -> bool {
    let Some(value) = value else {
        // A missing attribute is "not equal" to anything
        return attr.op == AttrOp::NotEquals;
    };

    let (value, expected) = if attr.case_insensitive {
        (value.to_lowercase(), attr.value.to_lowercase())
    } else {
        (value.to_string(), attr.value.clone())
    };

    match attr.op {
        AttrOp::Exists => true,
        AttrOp::Equals => value == expected,
        AttrOp::NotEquals => value != expected,
        AttrOp::Includes => {
            !expected.is_empty() && value.split_whitespace().any(|word| word == expected)
        }
        AttrOp::DashMatch => {
            value == expected
                || value
                    .strip_prefix(expected.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        AttrOp::Prefix => !expected.is_empty() && value.starts_with(&expected),
        AttrOp::Suffix => !expected.is_empty() && value.ends_with(&expected),
        AttrOp::Substring => !expected.is_empty() && value.contains(&expected),
    }
}

/// 1-based position of `node` among `siblings`, and their count
///
/// A node without a parent counts as its own only sibling.
fn position(siblings: &[NodeId], node: NodeId) -> (i32, i32) {
    let index = siblings.iter().position(|&s| s == node).unwrap_or(0);
    (index as i32 + 1, siblings.len().max(1) as i32)
}

fn element_siblings(tree: &DomTree, node: NodeId, same_type: Option<&str>) -> Vec<NodeId> {
    let Some(parent) = tree.parent(node) else {
        return vec![node];
    };
    tree.element_children(parent)
        .filter(|&child| match same_type {
            Some(tag) => tree.get(child).and_then(Node::tag_name) == Some(tag),
            None => true,
        })
        .collect()
}

fn match_pseudo(tree: &DomTree, pseudo: &PseudoClass, node: NodeId, elem: &ElementData) -> bool {
    let child_position = || position(&element_siblings(tree, node, None), node);
    let type_position = || position(&element_siblings(tree, node, Some(elem.name.as_str())), node);

    match pseudo {
        PseudoClass::Root => tree.parent(node).is_none_or(|p| !tree.is_element(p)),
        PseudoClass::Empty => tree.children(node).all(|child| match tree.get(child) {
            Some(n) if n.is_element() => false,
            Some(n) => n.as_text().is_none_or(str::is_empty),
            None => true,
        }),
        PseudoClass::FirstChild => child_position().0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = child_position();
            index == count
        }
        PseudoClass::OnlyChild => child_position().1 == 1,
        PseudoClass::FirstOfType => type_position().0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = type_position();
            index == count
        }
        PseudoClass::OnlyOfType => type_position().1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(child_position().0),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = child_position();
            expr.matches(count - index + 1)
        }
        PseudoClass::NthOfType(expr) => expr.matches(type_position().0),
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = type_position();
            expr.matches(count - index + 1)
        }
        PseudoClass::Checked => match elem.name.as_str() {
            "input" => {
                elem.has_attr("checked")
                    && matches!(elem.get_attr("type"), Some(t) if t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio"))
            }
            "option" => elem.has_attr("selected"),
            _ => false,
        },
        PseudoClass::Disabled => FORM_ELEMENTS.contains(&elem.name.as_str()) && elem.has_attr("disabled"),
        PseudoClass::Enabled => FORM_ELEMENTS.contains(&elem.name.as_str()) && !elem.has_attr("disabled"),
        PseudoClass::Not(list) => !list.matches(tree, node),
        PseudoClass::Is(list) => list.matches(tree, node),
        PseudoClass::Has(list) => has_match(tree, list, node),
        PseudoClass::Contains(text) => tree.text_content(node).contains(text.as_str()),
    }
}

/// `:has()` candidates are the subject's descendants, plus its following
/// siblings (and their subtrees) for sibling-anchored entries
fn has_match(tree: &DomTree, list: &SelectorList, node: NodeId) -> bool {
    list.selectors.iter().any(|sel| {
        let matches = |candidate: NodeId| match_complex(tree, sel, candidate, Some(node));
        match sel.anchor {
            Some(Combinator::NextSibling | Combinator::SubsequentSibling) => tree
                .following_siblings(node)
                .any(|sibling| matches(sibling) || tree.descendants(sibling).any(&matches)),
            _ => tree.descendants(node).any(&matches),
        }
    })
}
