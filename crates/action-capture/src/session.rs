//! Recording session state.

use recorder_core_types::RecordingId;
use tracing::info;

/// Explicit recording state passed into the capture handlers.
///
/// The enabled flag is the "Recording: ON/OFF" toggle; disabled sessions drop
/// events instead of synthesizing locators for them.
#[derive(Clone, Debug)]
pub struct RecorderSession {
    id: RecordingId,
    enabled: bool,
    current_url: String,
}

impl RecorderSession {
    pub fn new(url: impl Into<String>) -> Self {
        let id = RecordingId::new();
        info!("Recording session {id} started");
        Self {
            id,
            enabled: true,
            current_url: url.into(),
        }
    }

    pub fn id(&self) -> &RecordingId {
        &self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        info!(
            "Recording session {}: {}",
            self.id,
            if enabled { "ON" } else { "OFF" }
        );
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.enabled);
    }

    /// URL attached to subsequent records.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub(crate) fn set_url(&mut self, url: impl Into<String>) {
        self.current_url = url.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_start_enabled() {
        let session = RecorderSession::new("https://example.test/");
        assert!(session.is_enabled());
        assert_eq!(session.current_url(), "https://example.test/");
    }

    #[test]
    fn toggle_flips_state() {
        let mut session = RecorderSession::new("https://example.test/");
        session.toggle();
        assert!(!session.is_enabled());
        session.toggle();
        assert!(session.is_enabled());
    }
}
