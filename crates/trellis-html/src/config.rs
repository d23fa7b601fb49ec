//! Parser Configuration

/// Parser configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Keep text nodes that contain only whitespace
    ///
    /// On by default so `contents` and `text` see the source spacing.
    pub keep_whitespace_text: bool,

    /// Keep comment nodes
    pub keep_comments: bool,

    /// Keep the DOCTYPE node of full documents
    pub keep_doctype: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            keep_whitespace_text: true,
            keep_comments: true,
            keep_doctype: true,
        }
    }
}
