// ============================================================================
// Domain Kernel - Generic Entity/Event/Aggregate Contracts
// ============================================================================
//
// Generic, reusable contracts shared by every hub domain.
// Domain-specific code lives in src/domain/.
//
// ============================================================================

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;

pub use aggregate::{AggregateRoot, EventBuffer};
pub use entity::{AuditMetadata, Entity, EntityStatus, OperationType};
pub use error::ConcurrencyConflict;
pub use event::{deserialize_event, serialize_event, DomainEvent, EventRecord};
