use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Event Envelope - Journal Metadata
// ============================================================================
//
// Wraps an applied domain event with the session it happened in and its
// position in that session's journal.
//
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub sequence_number: u64,
    pub event_type: String,
    pub event_data: E,
    pub timestamp: DateTime<Utc>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(session_id: Uuid, sequence_number: u64, event_data: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            session_id,
            sequence_number,
            event_type: event_data.event_type().to_string(),
            event_data,
            timestamp: Utc::now(),
        }
    }
}

/// Domain events name themselves for journals, logs and metric labels
pub trait DomainEvent: Clone + Send + Sync {
    fn event_type(&self) -> &'static str;
}
