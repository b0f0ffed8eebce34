use std::collections::HashMap;

use super::value_objects::{Role, RoleId};

// ============================================================================
// Role Catalog
// ============================================================================
//
// Role definitions live outside the user aggregate. The aggregate only
// holds role ids; resolving an id to a definition goes through this
// catalog boundary so a dangling reference can be rejected up front.
//
// ============================================================================

/// Read-only lookup into the role catalog.
pub trait RoleCatalog {
    fn role(&self, id: RoleId) -> Option<&Role>;

    fn contains(&self, id: RoleId) -> bool {
        self.role(id).is_some()
    }
}

/// In-memory catalog for tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleCatalog {
    roles: HashMap<RoleId, Role>,
}

impl InMemoryRoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role.id, role);
    }
}

impl RoleCatalog for InMemoryRoleCatalog {
    fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_catalog_lookup() {
        let id = RoleId(Uuid::new_v4());
        let mut catalog = InMemoryRoleCatalog::new();
        catalog.insert(Role::new(id, "admin", "Administrator"));

        assert!(catalog.contains(id));
        assert_eq!(catalog.role(id).unwrap().code, "admin");
        assert!(!catalog.contains(RoleId(Uuid::new_v4())));
    }
}
