use super::entity::Entity;
use super::event::{DomainEvent, EventRecord};
use uuid::Uuid;

// ============================================================================
// Aggregate Root - Buffered Domain Events
// ============================================================================
//
// An aggregate root is an audited entity whose business methods append
// domain events to an in-memory buffer. The owning unit of work reads and
// clears the buffer after dispatching/persisting; one unit of work is one
// buffer generation.
//
// Appending is crate-private: events originate only from business methods
// inside this crate, never from outside callers.
//
// ============================================================================

/// Ordered buffer of domain events emitted by one aggregate instance.
///
/// Insertion order is emission order. External callers get a read-only
/// slice plus `clear`/`take`; only crate-internal business methods can
/// append through [`EventBuffer::record`].
#[derive(Debug, Clone)]
pub struct EventBuffer<E> {
    events: Vec<EventRecord<E>>,
}

impl<E: DomainEvent> EventBuffer<E> {
    /// Empty buffer for a newly constructed or reconstructed aggregate.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn as_slice(&self) -> &[EventRecord<E>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Empty the buffer. Idempotent: clearing an empty buffer is a no-op.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drain the buffer, handing ownership of the records to the caller.
    pub fn take(&mut self) -> Vec<EventRecord<E>> {
        std::mem::take(&mut self.events)
    }

    /// Append an event. Crate-private: callable only by aggregate business
    /// methods, which keeps fabricated events unrepresentable outside the
    /// domain layer.
    pub(crate) fn record(&mut self, aggregate_id: Uuid, payload: E) {
        let record = EventRecord::new(aggregate_id, payload);
        tracing::debug!(
            aggregate_id = %aggregate_id,
            event_type = record.event_type(),
            "domain event recorded"
        );
        self.events.push(record);
    }
}

impl<E: DomainEvent> Default for EventBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability of an audited entity that emits domain events.
pub trait AggregateRoot: Entity {
    type Event: DomainEvent;

    /// Read-only view of the buffered events, in emission order.
    fn domain_events(&self) -> &[EventRecord<Self::Event>];

    /// Empty the buffer once the unit of work has dispatched the events.
    fn clear_domain_events(&mut self);

    /// Read and clear in one step.
    fn take_domain_events(&mut self) -> Vec<EventRecord<Self::Event>>;
}

// ============================================================================
// Tests
// ============================================================================
