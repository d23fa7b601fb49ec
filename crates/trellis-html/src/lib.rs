//! trellis HTML Parser
//!
//! HTML5 parsing built on html5ever. Full documents become a fresh
//! [`DomTree`](trellis_dom::DomTree); fragments are grafted into an existing
//! tree as detached roots so their nodes share identity space with it.

mod config;
mod parser;

pub use config::ParserConfig;
pub use parser::HtmlParser;

use trellis_dom::DomTree;

/// Parse an HTML document with the default configuration
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse(html)
}

/// Check whether a string should be treated as markup rather than a selector
///
/// Markup starts with `<`, ends with `>` and is at least three characters
/// long once surrounding whitespace is trimmed.
pub fn is_html(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 3 && text.starts_with('<') && text.ends_with('>')
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),
}
