//! Query errors

use trellis_css::SelectorError;
use trellis_html::ParseError;

/// Error raised by a query operation
///
/// Operations fail before touching the tree, so an error never leaves a
/// partially applied change behind.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Malformed selector text
    #[error(transparent)]
    SelectorSyntax(#[from] SelectorError),

    /// Argument the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Markup could not be read
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
