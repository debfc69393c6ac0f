//! Host query port required by the synthesis core.

use crate::css;
use crate::errors::QueryError;
use crate::tree::DomTree;
use crate::xpath;

/// The two counting primitives the synthesis core requires from its host
/// environment. Implementations evaluate against the live document; errors
/// mean "this expression cannot be evaluated", which callers must treat as a
/// no-match, not a hard failure.
pub trait DomQuery {
    /// Number of nodes matching an XPath expression.
    fn count_xpath(&self, expression: &str) -> Result<usize, QueryError>;

    /// Number of nodes matching a CSS selector.
    fn count_css(&self, selector: &str) -> Result<usize, QueryError>;
}

impl DomQuery for DomTree {
    fn count_xpath(&self, expression: &str) -> Result<usize, QueryError> {
        xpath::count(self, expression)
    }

    fn count_css(&self, selector: &str) -> Result<usize, QueryError> {
        css::count(self, selector)
    }
}
