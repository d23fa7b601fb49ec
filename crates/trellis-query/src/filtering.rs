//! Iteration, filtering and positions

use std::collections::HashSet;

use trellis_css::SelectorList;
use trellis_dom::NodeId;

use crate::{Flow, Mapped, Matcher, Result, Selection, Target};

impl Selection {
    /// Call `f` with `(index, node)` for each node
    ///
    /// Returning `false` (or [`Flow::Stop`]) ends the loop; `()` keeps going.
    pub fn each<R: Into<Flow>>(&self, mut f: impl FnMut(usize, NodeId) -> R) -> Selection {
        for (index, node) in self.iter().enumerate() {
            if f(index, node).into() == Flow::Stop {
                break;
            }
        }
        self.clone()
    }

    /// Collect what `f` returns for each node
    ///
    /// Return `None` to skip a node, `Some(value)` to keep one value or a
    /// `Vec` to splice in several.
    pub fn map<T, R>(&self, mut f: impl FnMut(usize, NodeId) -> R) -> Mapped<T>
    where
        R: IntoIterator<Item = T>,
    {
        let items = self
            .iter()
            .enumerate()
            .flat_map(|(index, node)| f(index, node))
            .collect();
        Mapped::new(items, self.clone())
    }

    /// Nodes that pass the matcher
    pub fn filter<'a>(&self, matcher: impl Into<Matcher<'a>>) -> Result<Selection> {
        let keep = self.test_each("filter", matcher.into())?;
        Ok(self.derive("filter", self.pick(&keep, true)))
    }

    /// Nodes that fail the matcher
    pub fn not<'a>(&self, matcher: impl Into<Matcher<'a>>) -> Result<Selection> {
        let keep = self.test_each("not", matcher.into())?;
        Ok(self.derive("not", self.pick(&keep, false)))
    }

    /// Nodes with at least one matching descendant
    pub fn has<'a>(&self, target: impl Into<Target<'a>>) -> Result<Selection> {
        let doc = self.document();
        let nodes: Vec<NodeId> = match target.into() {
            Target::Selector(text) => {
                let list = SelectorList::parse_relative(text)?;
                doc.with_tree(|tree| {
                    self.iter()
                        .filter(|&node| {
                            tree.descendants(node)
                                .any(|inner| list.matches_in_scope(tree, inner, node))
                        })
                        .collect()
                })
            }
            target @ Target::Markup(_) => return Err(target.unsupported("has")),
            target => {
                let inner = doc.resolve(target)?;
                doc.with_tree(|tree| {
                    self.iter()
                        .filter(|&node| inner.iter().any(|&other| tree.contains(node, other)))
                        .collect()
                })
            }
        };
        Ok(self.derive("has", nodes))
    }

    /// Position of the first node among its parent's element children
    pub fn index(&self) -> Option<usize> {
        let node = self.get(0)?;
        self.document().with_tree(|tree| tree.element_index(node))
    }

    /// Position of a node relative to `target`
    ///
    /// With a selector: where the first selected node sits among all
    /// document matches. With nodes or a selection: where the first of them
    /// sits in this selection.
    pub fn index_of<'a>(&self, target: impl Into<Target<'a>>) -> Result<Option<usize>> {
        match target.into() {
            Target::Selector(text) => {
                let matched = self.document().select(text)?;
                Ok(self.get(0).and_then(|first| matched.iter().position(|n| n == first)))
            }
            target @ Target::Markup(_) => Err(target.unsupported("index_of")),
            target => {
                let needle = self.document().resolve(target)?.first().copied();
                Ok(needle.and_then(|needle| self.iter().position(|n| n == needle)))
            }
        }
    }

    /// Evaluate a matcher against every node, in order
    ///
    /// Predicates run without the tree borrowed, so they may read the
    /// document freely.
    pub(crate) fn test_each(&self, op: &str, matcher: Matcher<'_>) -> Result<Vec<bool>> {
        match matcher {
            Matcher::Predicate(mut f) => Ok(self
                .iter()
                .enumerate()
                .map(|(index, node)| f(index, node))
                .collect()),
            Matcher::Target(Target::Selector(text)) => {
                let list = SelectorList::parse(text)?;
                Ok(self
                    .document()
                    .with_tree(|tree| self.iter().map(|node| list.matches(tree, node)).collect()))
            }
            Matcher::Target(target @ Target::Markup(_)) => Err(target.unsupported(op)),
            Matcher::Target(target) => {
                let wanted: HashSet<NodeId> =
                    self.document().resolve(target)?.into_iter().collect();
                Ok(self.iter().map(|node| wanted.contains(&node)).collect())
            }
        }
    }

    fn pick(&self, flags: &[bool], wanted: bool) -> Vec<NodeId> {
        self.iter()
            .zip(flags)
            .filter(|&(_, &flag)| flag == wanted)
            .map(|(node, _)| node)
            .collect()
    }
}
