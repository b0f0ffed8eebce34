//! Domain kernel for the intelligent hub backend.
//!
//! Provides the audited-entity, domain-event, and aggregate-root contracts
//! shared by every hub service, plus the concrete [`domain::user::User`]
//! aggregate. Persistence, HTTP, and event dispatch are collaborators: they
//! construct aggregates, invoke business methods, then read and clear the
//! event buffer within one unit of work.

pub mod core;
pub mod domain;

pub use crate::core::{
    AggregateRoot, AuditMetadata, ConcurrencyConflict, DomainEvent, Entity, EntityStatus,
    EventBuffer, EventRecord, OperationType,
};
pub use crate::domain::user::{User, UserError, UserEvent};
