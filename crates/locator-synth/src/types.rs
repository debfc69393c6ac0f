//! Core types for the synthesis chain

use recorder_core_types::NOT_AVAILABLE;
use serde::{Deserialize, Serialize};

/// XPath strategy enumeration, in fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XpathStrategy {
    /// Unique identifier attribute, exact then case-insensitive
    Identifier,

    /// First stable attribute from the fixed priority list
    StableAttribute,

    /// Any `data-*` attribute in encounter order
    DataAttribute,

    /// Every present stable attribute ANDed on one tag
    MultiAttribute,

    /// Normalized text content, exact then substring
    TextContent,

    /// Positional path below the closest identified ancestor
    AncestorRelative,

    /// Full positional path from the document root
    AbsolutePositional,
}

impl XpathStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            XpathStrategy::Identifier => "identifier",
            XpathStrategy::StableAttribute => "stable-attribute",
            XpathStrategy::DataAttribute => "data-attribute",
            XpathStrategy::MultiAttribute => "multi-attribute",
            XpathStrategy::TextContent => "text-content",
            XpathStrategy::AncestorRelative => "ancestor-relative",
            XpathStrategy::AbsolutePositional => "absolute-positional",
        }
    }

    /// Get all strategies in fallback order
    pub fn fallback_chain() -> Vec<XpathStrategy> {
        vec![
            XpathStrategy::Identifier,
            XpathStrategy::StableAttribute,
            XpathStrategy::DataAttribute,
            XpathStrategy::MultiAttribute,
            XpathStrategy::TextContent,
            XpathStrategy::AncestorRelative,
            XpathStrategy::AbsolutePositional,
        ]
    }
}

/// CSS strategy enumeration, in fallback priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CssStrategy {
    /// `#id` selector
    Identifier,

    /// Attribute selector on the tag for a short stable-attribute list
    StableAttribute,

    /// Compound class selector, dynamic-looking tokens dropped
    ClassNames,
}

impl CssStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            CssStrategy::Identifier => "identifier",
            CssStrategy::StableAttribute => "stable-attribute",
            CssStrategy::ClassNames => "class-names",
        }
    }

    /// Get all strategies in fallback order
    pub fn fallback_chain() -> Vec<CssStrategy> {
        vec![
            CssStrategy::Identifier,
            CssStrategy::StableAttribute,
            CssStrategy::ClassNames,
        ]
    }
}

/// One candidate expression produced by a strategy, tagged with the
/// confidence it would carry if it validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The locator expression to validate.
    pub expression: String,

    /// Whether acceptance would rest on weaker evidence (normalization,
    /// substring match, pure position).
    pub needs_review: bool,
}

impl Candidate {
    /// Candidate backed by exact-match evidence.
    pub fn exact(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            needs_review: false,
        }
    }

    /// Candidate accepted only with a review flag.
    pub fn review(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            needs_review: true,
        }
    }
}

/// Outcome of the XPath chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpathOutcome {
    /// Winning expression, or `N/A`.
    pub xpath: String,

    /// Whether the expression matched exactly one node at synthesis time.
    pub validated: bool,

    /// Whether the result should be manually checked before replay.
    pub needs_review: bool,

    /// Which strategy produced the winning expression, if any.
    pub strategy: Option<XpathStrategy>,
}

impl XpathOutcome {
    /// The universal fail-closed outcome.
    pub fn not_available() -> Self {
        Self {
            xpath: NOT_AVAILABLE.to_string(),
            validated: false,
            needs_review: true,
            strategy: None,
        }
    }
}

/// Immutable synthesis result for one element.
///
/// `xpath` and `css_selector` are computed independently and may disagree;
/// neither is normalized against the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorResult {
    /// Best XPath expression found, or `N/A`.
    pub xpath: String,

    /// Best CSS selector found, or `N/A`.
    #[serde(rename = "cssSelector")]
    pub css_selector: String,

    /// Whether the chosen XPath matched exactly one node.
    pub validated: bool,

    /// Whether the XPath was accepted on weaker evidence.
    #[serde(rename = "needsReview")]
    pub needs_review: bool,
}

impl LocatorResult {
    /// The universal fail-closed result.
    pub fn not_available() -> Self {
        Self {
            xpath: NOT_AVAILABLE.to_string(),
            css_selector: NOT_AVAILABLE.to_string(),
            validated: false,
            needs_review: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpath_fallback_chain_order() {
        let chain = XpathStrategy::fallback_chain();
        assert_eq!(chain.len(), 7);
        assert_eq!(chain[0], XpathStrategy::Identifier);
        assert_eq!(chain[1], XpathStrategy::StableAttribute);
        assert_eq!(chain[6], XpathStrategy::AbsolutePositional);
    }

    #[test]
    fn css_fallback_chain_order() {
        let chain = CssStrategy::fallback_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0], CssStrategy::Identifier);
        assert_eq!(chain[2], CssStrategy::ClassNames);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(XpathStrategy::Identifier.name(), "identifier");
        assert_eq!(XpathStrategy::AbsolutePositional.name(), "absolute-positional");
        assert_eq!(CssStrategy::ClassNames.name(), "class-names");
    }

    #[test]
    fn not_available_is_flagged_for_review() {
        let outcome = XpathOutcome::not_available();
        assert_eq!(outcome.xpath, "N/A");
        assert!(!outcome.validated);
        assert!(outcome.needs_review);
        assert_eq!(outcome.strategy, None);
    }

    #[test]
    fn locator_result_wire_shape() {
        let result = LocatorResult {
            xpath: "//*[@id=\"a\"]".to_string(),
            css_selector: "#a".to_string(),
            validated: true,
            needs_review: false,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["cssSelector"], "#a");
        assert_eq!(json["needsReview"], false);
    }
}
