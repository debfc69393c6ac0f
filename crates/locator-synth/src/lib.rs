//! Stable locator synthesis - ordered strategy chain with validation
//!
//! This crate implements the locator synthesis engine:
//! - XPath chain: identifier, stable attributes, data attributes,
//!   multi-attribute combination, text content, ancestor-relative and
//!   absolute positional fallbacks, first validated candidate wins
//! - CSS chain: identifier, short stable-attribute list, filtered class
//!   compound, no positional fallback
//! - Live uniqueness validation through the host's [`dom_bridge::DomQuery`]
//!   counting oracles (a candidate is accepted iff it matches exactly one
//!   node)
//! - Confidence classification: results accepted on weaker evidence
//!   (normalization, substring, pure position) carry `needs_review = true`

pub mod label;
pub mod resolver;
pub mod strategies;
pub mod types;

pub use label::to_label;
pub use resolver::LocatorSynthesizer;
pub use types::{Candidate, CssStrategy, LocatorResult, XpathOutcome, XpathStrategy};
