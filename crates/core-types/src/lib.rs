//! Shared primitives for the interaction recorder crates.
//!
//! Holds the wire-facing action record, the action kind enumeration, and the
//! small id/time helpers every layer needs. Field names serialize exactly as
//! the collector endpoint expects them (`cssSelector`, `xpathValidated`, ...).

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel used wherever a locator expression could not be synthesized.
pub const NOT_AVAILABLE: &str = "N/A";

/// Identifier for one recording session.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RecordingId(pub String);

impl RecordingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RecordingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of captured user interaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "click")]
    Click,

    #[serde(rename = "input")]
    Input,

    #[serde(rename = "formSubmit")]
    FormSubmit,

    #[serde(rename = "navigation")]
    Navigation,
}

impl ActionKind {
    /// Wire name of the action kind.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::Input => "input",
            ActionKind::FormSubmit => "formSubmit",
            ActionKind::Navigation => "navigation",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One captured interaction, ready for the transport layer.
///
/// The locator fields are attached verbatim from the synthesis result; the
/// record never reinterprets or normalizes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Action kind ("click", "input", "formSubmit", "navigation").
    #[serde(rename = "type")]
    pub kind: ActionKind,

    /// Human-readable element label, display only.
    pub target: String,

    /// Captured value (input text, clicked element text, ...).
    pub value: String,

    /// Page URL at capture time.
    pub url: String,

    /// Best XPath expression found, or `N/A`.
    pub xpath: String,

    /// Best CSS selector found, or `N/A`.
    #[serde(rename = "cssSelector")]
    pub css_selector: String,

    /// Whether the XPath matched exactly one node at synthesis time.
    #[serde(rename = "xpathValidated")]
    pub xpath_validated: bool,

    /// Whether the XPath was accepted on weaker evidence and should be
    /// checked before long-term replay.
    #[serde(rename = "xpathNeedsReview")]
    pub xpath_needs_review: bool,

    /// Capture time, unix milliseconds.
    pub timestamp: i64,
}

/// Current time as unix milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_kind_wire_names() {
        assert_eq!(ActionKind::Click.name(), "click");
        assert_eq!(ActionKind::FormSubmit.name(), "formSubmit");
        assert_eq!(
            serde_json::to_string(&ActionKind::Navigation).unwrap(),
            "\"navigation\""
        );
    }

    #[test]
    fn action_record_wire_shape() {
        let record = ActionRecord {
            kind: ActionKind::Click,
            target: "BUTTON#save".to_string(),
            value: "Save".to_string(),
            url: "https://example.test/form".to_string(),
            xpath: "//*[@id=\"save\"]".to_string(),
            css_selector: "#save".to_string(),
            xpath_validated: true,
            xpath_needs_review: false,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "click");
        assert_eq!(json["cssSelector"], "#save");
        assert_eq!(json["xpathValidated"], true);
        assert_eq!(json["xpathNeedsReview"], false);

        let back: ActionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn recording_ids_are_unique() {
        assert_ne!(RecordingId::new(), RecordingId::new());
    }
}
