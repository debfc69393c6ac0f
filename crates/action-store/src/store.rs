//! Lock-guarded in-memory store.

use parking_lot::RwLock;
use recorder_core_types::{now_ms, ActionRecord};
use tracing::info;

use crate::model::TestCaseRow;

/// Result of one ingested batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IngestSummary {
    pub received: usize,
    pub total_actions: usize,
    pub total_test_cases: usize,
}

#[derive(Default)]
struct StoreInner {
    actions: Vec<ActionRecord>,
    test_cases: Vec<TestCaseRow>,
}

/// In-memory action store shared between the host's ingestion path and its
/// readers. The synthesis core never touches this; it exists for the layer
/// that consumes finished records.
#[derive(Default)]
pub struct ActionStore {
    inner: RwLock<StoreInner>,
}

impl ActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch and derive one test-case row per action.
    pub fn ingest(&self, batch: Vec<ActionRecord>) -> IngestSummary {
        let batch_ts = now_ms();
        let mut inner = self.inner.write();
        let rows: Vec<TestCaseRow> = batch
            .iter()
            .enumerate()
            .map(|(index, action)| TestCaseRow::from_action(action, batch_ts, index))
            .collect();
        let received = batch.len();
        inner.actions.extend(batch);
        inner.test_cases.extend(rows);
        let summary = IngestSummary {
            received,
            total_actions: inner.actions.len(),
            total_test_cases: inner.test_cases.len(),
        };
        info!(
            "Ingested {} actions ({} total)",
            summary.received, summary.total_actions
        );
        summary
    }

    pub fn actions(&self) -> Vec<ActionRecord> {
        self.inner.read().actions.clone()
    }

    pub fn test_cases(&self) -> Vec<TestCaseRow> {
        self.inner.read().test_cases.clone()
    }

    /// Drop everything.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.actions.clear();
        inner.test_cases.clear();
        info!("Store cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recorder_core_types::ActionKind;

    fn action(kind: ActionKind) -> ActionRecord {
        ActionRecord {
            kind,
            target: "BUTTON#go".to_string(),
            value: String::new(),
            url: "https://example.test/".to_string(),
            xpath: "//*[@id=\"go\"]".to_string(),
            css_selector: "#go".to_string(),
            xpath_validated: true,
            xpath_needs_review: false,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn ingest_accumulates_and_numbers_steps() {
        let store = ActionStore::new();
        let summary = store.ingest(vec![action(ActionKind::Click), action(ActionKind::FormSubmit)]);
        assert_eq!(summary.received, 2);
        assert_eq!(summary.total_actions, 2);
        assert_eq!(summary.total_test_cases, 2);

        let summary = store.ingest(vec![action(ActionKind::Navigation)]);
        assert_eq!(summary.total_actions, 3);

        let rows = store.test_cases();
        assert_eq!(rows[0].step, 1);
        assert_eq!(rows[1].step, 2);
        // Steps restart per batch, ids stay unique via the batch timestamp.
        assert_eq!(rows[2].step, 1);
    }

    #[test]
    fn clear_empties_both_tables() {
        let store = ActionStore::new();
        store.ingest(vec![action(ActionKind::Click)]);
        store.clear();
        assert!(store.actions().is_empty());
        assert!(store.test_cases().is_empty());
    }
}
