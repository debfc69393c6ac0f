//! DOM abstraction for the locator synthesis engine.
//!
//! Provides:
//! - An arena-backed element tree ([`DomTree`]) with cheap copyable element
//!   handles ([`ElementRef`]) exposing exactly what synthesis needs: tag,
//!   attributes, text, parent chain, sibling position, class list.
//! - The [`DomQuery`] port: the two counting primitives the synthesis core
//!   requires from its host (match-count for an XPath expression, match-count
//!   for a CSS selector).
//! - A built-in oracle implementation on [`DomTree`] covering the expression
//!   subset the synthesis chain emits. Anything outside the subset is a
//!   [`QueryError`], which callers treat as a failed candidate.

pub mod errors;
pub mod ports;
pub mod tree;

mod css;
mod xpath;

pub use errors::QueryError;
pub use ports::DomQuery;
pub use tree::{DomTree, ElementRef, NodeId, TreeBuilder};
