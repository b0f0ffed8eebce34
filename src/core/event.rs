use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Domain Event Record - Immutable Fact Metadata
// ============================================================================
//
// Wraps a domain event payload with the metadata collaborators need to
// dispatch or persist it. Generic over the payload type, so it works with
// any aggregate's event enum.
//
// ============================================================================

/// Capability implemented by every domain event payload.
pub trait DomainEvent: Serialize + Clone + Send + Sync {
    /// Symbolic tag for the kind of change, e.g. `"password-changed"`.
    fn event_type(&self) -> &'static str;

    /// Kind of aggregate that produced the event, e.g. `"user"`.
    fn aggregate_type(&self) -> &'static str;
}

/// An immutable record of something that happened inside an aggregate.
///
/// All fields are fixed at construction; there are no mutators. Records for
/// the same aggregate instance are created in emission order, so their
/// `occurred_on` timestamps are monotonic within one buffer generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord<E> {
    event_id: Uuid,
    occurred_on: DateTime<Utc>,
    event_type: String,
    aggregate_id: Uuid,
    aggregate_type: String,
    payload: E,
}

impl<E: DomainEvent> EventRecord<E> {
    pub fn new(aggregate_id: Uuid, payload: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_on: Utc::now(),
            event_type: payload.event_type().to_string(),
            aggregate_type: payload.aggregate_type().to_string(),
            aggregate_id,
            payload,
        }
    }
}

impl<E> EventRecord<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn aggregate_id(&self) -> Uuid {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}

// ============================================================================
// Event Serialization Helpers
// ============================================================================

pub fn serialize_event<E: Serialize>(event: &E) -> serde_json::Result<String> {
    serde_json::to_string(event)
}

pub fn deserialize_event<E: for<'de> Deserialize<'de>>(json: &str) -> serde_json::Result<E> {
    serde_json::from_str(json)
}

// ============================================================================
// Tests
// ============================================================================
