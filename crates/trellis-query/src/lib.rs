//! trellis Query - Selections over parsed documents
//!
//! Chainable, jQuery-style navigation of a [`DomTree`].
//!
//! # Features
//! - Traversal: find, children, siblings, ancestors, `*_until` ranges
//! - Filtering by selector, node, selection or predicate
//! - Document-ordered unions (`add`, `add_back`)
//! - Inline `style` reads and writes
//! - `end()` returns the exact selection a result was derived from
//!
//! ```
//! use trellis_query::Document;
//!
//! let doc = Document::load(r#"<ul><li class="a">A</li><li class="b">B</li></ul>"#)?;
//! let b = doc.select(".a")?.next(None)?;
//! assert_eq!(b.text(), "B");
//! assert_eq!(b.end().text(), "A");
//! # Ok::<(), trellis_query::QueryError>(())
//! ```

mod args;
mod css;
mod document;
mod error;
mod filtering;
mod merge;
mod selection;
mod traversal;

pub use args::{Boundary, Flow, Matcher, Target};
pub use document::Document;
pub use error::{QueryError, Result};
pub use selection::{Mapped, Selection};

pub use trellis_css::{SelectorError, StyleDeclarations};
pub use trellis_dom::{DomTree, NodeId, NodeType};
pub use trellis_html::ParserConfig;
