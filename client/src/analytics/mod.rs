//! Analytics adapters.

use tracing::info;

use sodam_core::services::verification::traits::Analytics;
use sodam_core::services::verification::types::FlowEvent;

/// Analytics sink that writes flow events as structured log lines.
///
/// Stands in for a product analytics pipeline; events already carry only
/// kinds and counters, never contact values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl TracingAnalytics {
    pub fn new() -> Self {
        Self
    }
}

impl Analytics for TracingAnalytics {
    fn track(&self, event: &FlowEvent) {
        match event {
            FlowEvent::CodeRequested {
                flow,
                channel,
                resend,
            } => {
                info!(event = event.name(), %flow, %channel, resend, "flow event");
            }
            FlowEvent::CodeRequestFailed { flow, channel }
            | FlowEvent::VerificationSucceeded { flow, channel }
            | FlowEvent::AttemptsExhausted { flow, channel }
            | FlowEvent::ChannelSwitched { flow, channel } => {
                info!(event = event.name(), %flow, %channel, "flow event");
            }
            FlowEvent::VerificationFailed {
                flow,
                channel,
                failures,
            } => {
                info!(event = event.name(), %flow, %channel, failures, "flow event");
            }
            FlowEvent::FlowCompleted { flow } => {
                info!(event = event.name(), %flow, "flow event");
            }
        }
    }
}
