//! Test-case rows derived from action records.

use recorder_core_types::{ActionKind, ActionRecord};
use serde::{Deserialize, Serialize};

/// Test type classification
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TestType {
    Positive,
    Negative,
    Boundary,
    Functional,
    #[serde(rename = "UI")]
    Ui,
}

/// Inputs longer than this are treated as boundary probes.
const BOUNDARY_VALUE_LEN: usize = 50;

/// Classify one action into a test type.
pub fn classify(action: &ActionRecord) -> TestType {
    match action.kind {
        ActionKind::Input => {
            if action.value.is_empty() {
                TestType::Negative
            } else if action.value.len() > BOUNDARY_VALUE_LEN {
                TestType::Boundary
            } else {
                TestType::Positive
            }
        }
        ActionKind::FormSubmit => TestType::Functional,
        ActionKind::Navigation => TestType::Ui,
        ActionKind::Click => TestType::Functional,
    }
}

/// Expected-result text for one action kind.
pub fn expected_outcome(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Click => "Element should respond (open/toggle/submit).",
        ActionKind::Input => "Field should accept and validate input.",
        ActionKind::FormSubmit => "Form should submit successfully.",
        ActionKind::Navigation => "Page should load correctly.",
    }
}

/// One row of the derived test-case table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRow {
    pub id: String,
    pub step: usize,
    pub action: ActionKind,
    pub target: String,
    pub value: String,
    pub url: String,
    pub expected: String,
    #[serde(rename = "testType")]
    pub test_type: TestType,
    pub xpath: String,
    pub timestamp: i64,
}

impl TestCaseRow {
    /// Derive a row from an action. `step` is 1-based within the batch.
    pub fn from_action(action: &ActionRecord, batch_ts: i64, index: usize) -> Self {
        Self {
            id: format!("TC-{batch_ts}-{index}"),
            step: index + 1,
            action: action.kind,
            target: action.target.clone(),
            value: action.value.clone(),
            url: action.url.clone(),
            expected: expected_outcome(action.kind).to_string(),
            test_type: classify(action),
            xpath: action.xpath.clone(),
            timestamp: action.timestamp,
        }
    }
}
