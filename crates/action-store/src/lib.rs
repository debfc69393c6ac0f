//! Downstream consumer of action records.
//!
//! Stores ingested batches in memory and derives one test-case row per
//! action at ingestion time: classification, expected-result text, step
//! numbering. No transport or persistence; the host owns those.

pub mod model;
pub mod store;

pub use model::{classify, expected_outcome, TestCaseRow, TestType};
pub use store::{ActionStore, IngestSummary};
