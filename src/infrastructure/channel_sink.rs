use crate::domain::models::{Diagnostic, DiagnosticSink};
use crossbeam_channel::{Receiver, Sender};

use super::tracing_sink::TracingSink;

/// Logs each diagnostic and forwards it to a channel so the caller can
/// collect them once the run is over.
#[derive(Clone)]
pub struct ChannelSink {
    diagnostics: Sender<Diagnostic>,
}

impl ChannelSink {
    pub fn channel() -> (Self, Receiver<Diagnostic>) {
        let (diagnostics, receiver) = crossbeam_channel::unbounded();
        (Self { diagnostics }, receiver)
    }
}

impl DiagnosticSink for ChannelSink {
    fn report(&self, diagnostic: Diagnostic) {
        TracingSink.report(diagnostic.clone());
        if self.diagnostics.send(diagnostic).is_err() {
            tracing::debug!("Diagnostic receiver dropped");
        }
    }
}
