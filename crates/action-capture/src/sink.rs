//! Transport boundary for captured records.

use recorder_core_types::ActionRecord;

/// Consumer of finished action records. The real host forwards them to its
/// batching/transport layer; tests collect them in memory.
pub trait ActionSink {
    fn record(&mut self, action: ActionRecord);
}

/// In-memory sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<ActionRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ActionRecord> {
        self.records
    }
}

impl ActionSink for MemorySink {
    fn record(&mut self, action: ActionRecord) {
        self.records.push(action);
    }
}
