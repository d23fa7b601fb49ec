//! Inline style declarations
//!
//! Codec for the text of a `style` attribute. Parsing is lenient: segments
//! without a name or a value are dropped silently.

use std::fmt;

use indexmap::IndexMap;

/// Ordered `property -> value` map parsed from a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleDeclarations {
    declarations: IndexMap<String, String>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name: value; name: value`
    ///
    /// Each segment is split on its first `:`, so values may contain colons
    /// (`url(http://...)`). A later duplicate overwrites the earlier value
    /// in place.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for segment in text.split(';') {
            let Some((name, value)) = segment.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            style.declarations.insert(name.to_string(), value.to_string());
        }
        style
    }

    /// Value of a property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations.get(name).map(String::as_str)
    }

    /// Set a property; an empty value removes it
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.remove(name);
        } else {
            self.declarations.insert(name.to_string(), value);
        }
    }

    /// Remove a property, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.declarations.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in map order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Keep only the requested properties, in request order
    ///
    /// Names without a declaration are left out.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let declarations = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                self.get(name).map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        Self { declarations }
    }
}

impl fmt::Display for StyleDeclarations {
    /// `name: value;` entries separated by a single space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (name, value) in iter {
            let name: String = name.into();
            style.set(&name, value);
        }
        style
    }
}
