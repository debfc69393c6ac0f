//! First-validated-wins driver over the strategy chains.

use dom_bridge::{DomQuery, ElementRef};
use recorder_core_types::NOT_AVAILABLE;
use tracing::{debug, warn};

use crate::strategies;
use crate::types::{CssStrategy, LocatorResult, XpathOutcome, XpathStrategy};

/// Locator synthesizer bound to a host query oracle.
///
/// Synthesis is synchronous and pure with respect to the document: the same
/// element against the same unmodified tree always yields the same result.
pub struct LocatorSynthesizer<'a, Q: DomQuery + ?Sized> {
    oracle: &'a Q,
}

impl<'a, Q: DomQuery + ?Sized> LocatorSynthesizer<'a, Q> {
    pub fn new(oracle: &'a Q) -> Self {
        Self { oracle }
    }

    /// Synthesize both locator forms for one element. Fails closed: a missing
    /// element yields the universal `N/A` result.
    pub fn locate(&self, el: Option<ElementRef<'_>>) -> LocatorResult {
        let outcome = self.synthesize_xpath(el);
        let css_selector = self.synthesize_css(el);
        LocatorResult {
            xpath: outcome.xpath,
            css_selector,
            validated: outcome.validated,
            needs_review: outcome.needs_review,
        }
    }

    /// Run the ordered XPath strategy chain; the first candidate matching
    /// exactly one document node wins.
    pub fn synthesize_xpath(&self, el: Option<ElementRef<'_>>) -> XpathOutcome {
        let Some(el) = el else {
            debug!("no element to synthesize an xpath for");
            return XpathOutcome::not_available();
        };

        for strategy in XpathStrategy::fallback_chain() {
            debug!("Trying xpath strategy: {}", strategy.name());
            for candidate in strategies::xpath_candidates(strategy, el) {
                if self.validate_xpath(&candidate.expression) {
                    debug!(
                        "Strategy {} validated: {}",
                        strategy.name(),
                        candidate.expression
                    );
                    return XpathOutcome {
                        xpath: candidate.expression,
                        validated: true,
                        needs_review: candidate.needs_review,
                        strategy: Some(strategy),
                    };
                }
            }
        }

        // Expected terminal outcome, not a failure state.
        debug!("All xpath strategies exhausted");
        XpathOutcome::not_available()
    }

    /// Run the CSS chain; independent of the XPath chain, shorter, and with
    /// no positional fallback.
    pub fn synthesize_css(&self, el: Option<ElementRef<'_>>) -> String {
        let Some(el) = el else {
            return NOT_AVAILABLE.to_string();
        };

        for strategy in CssStrategy::fallback_chain() {
            debug!("Trying css strategy: {}", strategy.name());
            for selector in strategies::css_candidates(strategy, el) {
                if self.validate_css(&selector) {
                    return selector;
                }
            }
        }

        NOT_AVAILABLE.to_string()
    }

    fn validate_xpath(&self, expression: &str) -> bool {
        match self.oracle.count_xpath(expression) {
            Ok(count) => count == 1,
            Err(err) => {
                // A rejected candidate is a no-match, never an abort.
                warn!("xpath validation error for {expression}: {err}");
                false
            }
        }
    }

    fn validate_css(&self, selector: &str) -> bool {
        match self.oracle.count_css(selector) {
            Ok(count) => count == 1,
            Err(err) => {
                warn!("css validation error for {selector}: {err}");
                false
            }
        }
    }
}
