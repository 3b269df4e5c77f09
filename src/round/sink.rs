//! Delivery seam for round records.

use super::record::RoundRecord;
use crate::error::HandoffError;
use std::sync::{Mutex, PoisonError};

/// Destination for serialized round records.
///
/// Implementors own transport, retry, and response handling. The core only
/// calls [`submit`](Self::submit) with a flat JSON payload.
pub trait RecordSink: Send + Sync {
    /// Delivers one payload.
    fn submit(&self, payload: &str) -> Result<(), HandoffError>;
}

/// Sink that discards every payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn submit(&self, _payload: &str) -> Result<(), HandoffError> {
        Ok(())
    }
}

/// In-memory sink that keeps every payload it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    payloads: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of the payloads received so far, oldest first.
    pub fn payloads(&self) -> Vec<String> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for CollectingSink {
    fn submit(&self, payload: &str) -> Result<(), HandoffError> {
        self.payloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload.to_string());
        Ok(())
    }
}

/// Serializes `record` and submits it to `sink`, best effort.
///
/// Failures are logged and reported as `false`; they never propagate, so a
/// lost record cannot block the round transition.
pub fn hand_off<S: RecordSink + ?Sized>(sink: &S, record: &RoundRecord) -> bool {
    let payload = match record.to_payload() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(round = record.round, error = %e, "failed to serialize round record");
            return false;
        }
    };

    match sink.submit(&payload) {
        Ok(()) => {
            tracing::debug!(
                round = record.round,
                bytes = payload.len(),
                "round record delivered"
            );
            true
        }
        Err(e) => {
            tracing::warn!(round = record.round, error = %e, "round record handoff failed");
            false
        }
    }
}
