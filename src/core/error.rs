use uuid::Uuid;

// ============================================================================
// Kernel Errors
// ============================================================================

/// Optimistic-concurrency conflict detected by the persistence layer.
///
/// Raised when a save's expected version does not match the stored one.
/// Never retried by the domain kernel; the caller decides whether to
/// reload and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("version conflict on aggregate {aggregate_id}: expected {expected}, found {actual}")]
pub struct ConcurrencyConflict {
    pub aggregate_id: Uuid,
    pub expected: u64,
    pub actual: u64,
}
