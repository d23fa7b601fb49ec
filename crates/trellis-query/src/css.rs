//! Inline style access
//!
//! Reads look at the first node only. Writes rewrite the `style` attribute
//! of every element in the selection and hand back the same selection.

use trellis_css::StyleDeclarations;
use trellis_dom::{DomTree, NodeId};

use crate::Selection;

fn style_of(tree: &DomTree, node: NodeId) -> Option<StyleDeclarations> {
    tree.is_element(node)
        .then(|| StyleDeclarations::parse(tree.attr(node, "style").unwrap_or_default()))
}

impl Selection {
    /// Value of one property
    pub fn css(&self, name: &str) -> Option<String> {
        self.first_style()?.get(name).map(str::to_string)
    }

    /// The requested properties that are set, in request order
    pub fn css_many<S: AsRef<str>>(&self, names: &[S]) -> Option<StyleDeclarations> {
        Some(self.first_style()?.project(names))
    }

    /// Every declared property
    pub fn css_all(&self) -> Option<StyleDeclarations> {
        self.first_style()
    }

    /// Set one property on every element; an empty value removes it
    pub fn set_css(&self, name: &str, value: impl ToString) -> Selection {
        let value = value.to_string();
        self.update_styles(|style| style.set(name, value.as_str()));
        self.clone()
    }

    /// Set one property from a callback
    ///
    /// `f` gets `(index, node, current value)`; `None` removes the property.
    pub fn set_css_with(
        &self,
        name: &str,
        mut f: impl FnMut(usize, NodeId, Option<&str>) -> Option<String>,
    ) -> Selection {
        let doc = self.document();
        for (index, node) in self.iter().enumerate() {
            let Some(mut style) = doc.with_tree(|tree| style_of(tree, node)) else {
                continue;
            };
            let value = f(index, node, style.get(name));
            match value {
                Some(value) => style.set(name, value),
                None => {
                    style.remove(name);
                }
            }
            doc.with_tree_mut(|tree| tree.set_attr(node, "style", style.to_string()));
        }
        self.clone()
    }

    /// Apply several properties, in iteration order, to every element
    pub fn set_css_map<K, V>(&self, props: impl IntoIterator<Item = (K, V)>) -> Selection
    where
        K: AsRef<str>,
        V: ToString,
    {
        let props: Vec<(K, String)> = props
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect();
        self.update_styles(|style| {
            for (name, value) in &props {
                style.set(name.as_ref(), value.as_str());
            }
        });
        self.clone()
    }

    fn first_style(&self) -> Option<StyleDeclarations> {
        let node = self.get(0)?;
        self.document().with_tree(|tree| style_of(tree, node))
    }

    fn update_styles(&self, mut edit: impl FnMut(&mut StyleDeclarations)) {
        self.document().with_tree_mut(|tree| {
            for node in self.iter() {
                let Some(mut style) = style_of(tree, node) else {
                    continue;
                };
                edit(&mut style);
                tree.set_attr(node, "style", style.to_string());
            }
        });
    }
}
