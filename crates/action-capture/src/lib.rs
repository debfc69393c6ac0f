//! Interaction capture layer.
//!
//! Sits between the host's event wiring and the transport: each captured
//! event is turned into one [`recorder_core_types::ActionRecord`] with
//! locator fields synthesized once, synchronously, against the live tree,
//! then handed to an [`ActionSink`]. Recording state lives on an explicit
//! [`RecorderSession`] rather than free-floating module state.

pub mod capture;
pub mod session;
pub mod sink;

pub use capture::Recorder;
pub use session::RecorderSession;
pub use sink::{ActionSink, MemorySink};
