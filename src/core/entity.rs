use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Audited Entity - Identity + Audit Metadata
// ============================================================================
//
// Every persistent object in the hub carries the same audit block:
// creation/update timestamps and actors, plus an optimistic version counter.
// The counter is only exposed here; the compare-and-increment check belongs
// to the persistence layer.
//
// ============================================================================

/// Audit metadata embedded in every persistent entity.
///
/// `created_at`/`created_by` are set once at creation; `updated_at` is
/// refreshed by [`AuditMetadata::touch`] on every mutating operation.
/// `version` starts at 0 and is bumped by the persistence layer once per
/// successfully persisted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<String>,
    updated_by: Option<String>,
    version: u64,
}

impl AuditMetadata {
    /// Fresh metadata for a newly created entity, version 0.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
            version: 0,
        }
    }

    /// Metadata attributed to a known actor.
    pub fn created_by(actor: impl Into<String>) -> Self {
        let actor = actor.into();
        let mut meta = Self::new();
        meta.created_by = Some(actor.clone());
        meta.updated_by = Some(actor);
        meta
    }

    /// Rebuild metadata from persisted state.
    pub fn restore(
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        created_by: Option<String>,
        updated_by: Option<String>,
        version: u64,
    ) -> Self {
        Self {
            created_at,
            updated_at,
            created_by,
            updated_by,
            version,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn creator(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn updater(&self) -> Option<&str> {
        self.updated_by.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Refresh `updated_at`. Called by every mutating business method.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Refresh `updated_at` and record which actor performed the mutation.
    pub fn touch_by(&mut self, actor: impl Into<String>) {
        self.updated_by = Some(actor.into());
        self.touch();
    }

    /// Increment the optimistic version counter. Called by the persistence
    /// layer after a successful save, never by business methods.
    pub fn bump_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

impl Default for AuditMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity + audit capability shared by every persistent entity.
///
/// `id` is immutable after construction: there is deliberately no setter,
/// so reassigning an identity is unrepresentable.
pub trait Entity {
    fn id(&self) -> Uuid;

    fn audit(&self) -> &AuditMetadata;

    /// Mutable audit access for the persistence layer (version bump,
    /// actor attribution). Business methods use it to `touch`.
    fn audit_mut(&mut self) -> &mut AuditMetadata;
}

// ============================================================================
// Shared Taxonomies - Entity Status & Operation Type
// ============================================================================
//
// Pass-through data for collaborators: each value carries a machine code
// and a human-readable label.
//
// ============================================================================

/// Lifecycle status shared by all hub entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    Active,
    Inactive,
    Deleted,
    Archived,
}

impl EntityStatus {
    pub fn code(&self) -> &'static str {
        match self {
            EntityStatus::Active => "active",
            EntityStatus::Inactive => "inactive",
            EntityStatus::Deleted => "deleted",
            EntityStatus::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityStatus::Active => "Active",
            EntityStatus::Inactive => "Inactive",
            EntityStatus::Deleted => "Deleted",
            EntityStatus::Archived => "Archived",
        }
    }
}

/// Audit-log operation taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Update,
    Delete,
    Query,
    Export,
    Import,
}

impl OperationType {
    pub fn code(&self) -> &'static str {
        match self {
            OperationType::Create => "create",
            OperationType::Update => "update",
            OperationType::Delete => "delete",
            OperationType::Query => "query",
            OperationType::Export => "export",
            OperationType::Import => "import",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Create => "Create",
            OperationType::Update => "Update",
            OperationType::Delete => "Delete",
            OperationType::Query => "Query",
            OperationType::Export => "Export",
            OperationType::Import => "Import",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metadata_starts_at_version_zero() {
        let meta = AuditMetadata::new();
        assert_eq!(meta.version(), 0);
        assert_eq!(meta.created_at(), meta.updated_at());
        assert!(meta.creator().is_none());
    }

    #[test]
    fn test_created_by_attributes_both_actors() {
        let meta = AuditMetadata::created_by("admin");
        assert_eq!(meta.creator(), Some("admin"));
        assert_eq!(meta.updater(), Some("admin"));
    }

    #[test]
    fn test_touch_refreshes_updated_at_only() {
        let mut meta = AuditMetadata::new();
        let created = meta.created_at();
        meta.touch();
        assert_eq!(meta.created_at(), created);
        assert!(meta.updated_at() >= created);
    }

    #[test]
    fn test_touch_by_records_actor() {
        let mut meta = AuditMetadata::created_by("admin");
        meta.touch_by("support");
        assert_eq!(meta.creator(), Some("admin"));
        assert_eq!(meta.updater(), Some("support"));
    }

    #[test]
    fn test_bump_version_increments_once() {
        let mut meta = AuditMetadata::new();
        assert_eq!(meta.bump_version(), 1);
        assert_eq!(meta.bump_version(), 2);
        assert_eq!(meta.version(), 2);
    }

    #[test]
    fn test_status_codes_and_labels() {
        assert_eq!(EntityStatus::Active.code(), "active");
        assert_eq!(EntityStatus::Archived.label(), "Archived");
        assert_eq!(OperationType::Export.code(), "export");
        assert_eq!(OperationType::Query.label(), "Query");
    }
}
