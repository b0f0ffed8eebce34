use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::{
    AggregateRoot, AuditMetadata, Entity, EntityStatus, EventBuffer, EventRecord,
};

use super::catalog::RoleCatalog;
use super::errors::UserError;
use super::events::*;
use super::value_objects::{Permission, Role, RoleId, UserProfile};

// ============================================================================
// User Aggregate - Business Logic
// ============================================================================
//
// The aggregate mutates its own fields and appends one domain event per
// event-worthy operation. Mutation plus event append is atomic: every
// method validates first, so a failed precondition leaves the aggregate
// untouched and the buffer unchanged.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    username: String,
    email: String,
    phone: Option<String>,
    // Opaque credential: hashing happens upstream, this layer never
    // interprets the value.
    password: String,
    profile: Option<UserProfile>,
    status: EntityStatus,
    roles: BTreeSet<RoleId>,
    permissions: BTreeSet<Permission>,
    last_login_at: Option<DateTime<Utc>>,
    login_count: u64,
    audit: AuditMetadata,
    events: EventBuffer<UserEvent>,
}

impl User {
    /// New active user with an empty event buffer and version 0.
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            phone: None,
            password: password.into(),
            profile: None,
            status: EntityStatus::Active,
            roles: BTreeSet::new(),
            permissions: BTreeSet::new(),
            last_login_at: None,
            login_count: 0,
            audit: AuditMetadata::new(),
            events: EventBuffer::new(),
        }
    }

    // ------------------------------------------------------------------
    // Business methods
    // ------------------------------------------------------------------

    /// Replace the stored credential.
    ///
    /// Fails with [`UserError::PasswordMismatch`] unless `old_password`
    /// matches the stored value. The emitted event carries the user id
    /// only; the credential never enters the event stream.
    pub fn change_password(
        &mut self,
        old_password: &str,
        new_password: impl Into<String>,
    ) -> Result<(), UserError> {
        let new_password = new_password.into();
        if new_password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        if self.password != old_password {
            return Err(UserError::PasswordMismatch);
        }

        self.password = new_password;
        self.audit.touch();
        self.events.record(
            self.id,
            UserEvent::PasswordChanged(UserPasswordChanged { user_id: self.id }),
        );
        Ok(())
    }

    /// Add `role` to the user's role set.
    ///
    /// Membership is idempotent, event emission is not: a duplicate
    /// assignment leaves the set unchanged but still records an event,
    /// so the audit trail reflects every call.
    pub fn assign_role(&mut self, role: &Role) {
        self.roles.insert(role.id);
        self.audit.touch();
        self.events.record(
            self.id,
            UserEvent::RoleAssigned(UserRoleAssigned {
                user_id: self.id,
                role_id: role.id,
            }),
        );
    }

    /// Resolve `role_id` in the catalog and assign it, rejecting dangling
    /// references with [`UserError::RoleNotFound`].
    pub fn assign_role_from(
        &mut self,
        catalog: &impl RoleCatalog,
        role_id: RoleId,
    ) -> Result<(), UserError> {
        let role = catalog
            .role(role_id)
            .cloned()
            .ok_or(UserError::RoleNotFound(role_id))?;
        self.assign_role(&role);
        Ok(())
    }

    /// Pure query: true iff some held permission's code equals `code`
    /// exactly. No case-folding, no wildcards, no event.
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|p| p.code == code)
    }

    /// Record a successful login: refresh the login statistics and emit
    /// a `logged-in` event.
    pub fn record_login(&mut self) {
        let at = Utc::now();
        self.last_login_at = Some(at);
        self.login_count += 1;
        self.audit.touch();
        self.events.record(
            self.id,
            UserEvent::LoggedIn(UserLoggedIn {
                user_id: self.id,
                at,
            }),
        );
    }

    /// Move the account to `new_status`, emitting a `status-changed`
    /// event with the old and new status codes.
    pub fn change_status(&mut self, new_status: EntityStatus) {
        let old_status = self.status;
        self.status = new_status;
        self.audit.touch();
        tracing::debug!(
            user_id = %self.id,
            from = old_status.code(),
            to = new_status.code(),
            "user status changed"
        );
        self.events.record(
            self.id,
            UserEvent::StatusChanged(UserStatusChanged {
                user_id: self.id,
                old_status: old_status.code().to_string(),
                new_status: new_status.code().to_string(),
            }),
        );
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn status(&self) -> EntityStatus {
        self.status
    }

    pub fn roles(&self) -> &BTreeSet<RoleId> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn login_count(&self) -> u64 {
        self.login_count
    }

    // ------------------------------------------------------------------
    // Setters - reconstruction plumbing for the persistence layer.
    // Plain field assignment, no audit touch, no events. The id has no
    // setter: identity is fixed at construction.
    // ------------------------------------------------------------------

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_profile(&mut self, profile: Option<UserProfile>) {
        self.profile = profile;
    }

    pub fn set_status(&mut self, status: EntityStatus) {
        self.status = status;
    }

    pub fn set_roles(&mut self, roles: BTreeSet<RoleId>) {
        self.roles = roles;
    }

    pub fn set_permissions(&mut self, permissions: BTreeSet<Permission>) {
        self.permissions = permissions;
    }

    pub fn set_last_login_at(&mut self, at: Option<DateTime<Utc>>) {
        self.last_login_at = at;
    }

    pub fn set_login_count(&mut self, count: u64) {
        self.login_count = count;
    }

    pub fn set_audit(&mut self, audit: AuditMetadata) {
        self.audit = audit;
    }
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditMetadata {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditMetadata {
        &mut self.audit
    }
}

impl AggregateRoot for User {
    type Event = UserEvent;

    fn domain_events(&self) -> &[EventRecord<UserEvent>] {
        self.events.as_slice()
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }

    fn take_domain_events(&mut self) -> Vec<EventRecord<UserEvent>> {
        self.events.take()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::catalog::InMemoryRoleCatalog;
    use crate::domain::user::value_objects::PermissionId;

    fn create_test_user() -> User {
        User::new(Uuid::new_v4(), "alice", "alice@example.com", "old")
    }

    fn role(code: &str) -> Role {
        Role::new(RoleId(Uuid::new_v4()), code, code.to_uppercase())
    }

    fn permission(code: &str) -> Permission {
        Permission::new(PermissionId(Uuid::new_v4()), code, code.to_uppercase())
    }

    #[test]
    fn test_new_user_has_empty_buffer() {
        let user = create_test_user();
        assert!(user.domain_events().is_empty());
        assert_eq!(user.status(), EntityStatus::Active);
        assert_eq!(user.audit().version(), 0);
    }

    #[test]
    fn test_change_password_with_correct_old_password() {
        let mut user = create_test_user();
        user.change_password("old", "new").unwrap();

        assert_eq!(user.password(), "new");
        assert_eq!(user.domain_events().len(), 1);

        let record = &user.domain_events()[0];
        assert_eq!(record.event_type(), "password-changed");
        assert_eq!(record.aggregate_id(), user.id());
        assert_eq!(record.aggregate_type(), "user");
    }

    #[test]
    fn test_change_password_event_never_carries_credential() {
        let mut user = create_test_user();
        user.change_password("old", "s3cret").unwrap();

        let json = serde_json::to_string(user.domain_events()[0].payload()).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(!json.contains("old"));
    }

    #[test]
    fn test_change_password_with_wrong_old_password_fails() {
        let mut user = create_test_user();
        let result = user.change_password("wrong", "new");

        assert_eq!(result.unwrap_err(), UserError::PasswordMismatch);
        // Failed precondition: no mutation, no event.
        assert_eq!(user.password(), "old");
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_change_password_rejects_empty_new_password() {
        let mut user = create_test_user();
        let result = user.change_password("old", "");

        assert_eq!(result.unwrap_err(), UserError::EmptyPassword);
        assert_eq!(user.password(), "old");
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_assign_role_adds_membership_and_event() {
        let mut user = create_test_user();
        let admin = role("admin");
        user.assign_role(&admin);

        assert!(user.roles().contains(&admin.id));
        assert_eq!(user.domain_events().len(), 1);
        assert_eq!(user.domain_events()[0].event_type(), "role-assigned");
        assert_eq!(
            user.domain_events()[0].payload(),
            &UserEvent::RoleAssigned(UserRoleAssigned {
                user_id: user.id(),
                role_id: admin.id,
            })
        );
    }

    #[test]
    fn test_duplicate_role_assignment_is_idempotent_on_membership_only() {
        let mut user = create_test_user();
        let admin = role("admin");

        user.assign_role(&admin);
        user.assign_role(&admin);

        // Membership is a set; the event trail still records both calls.
        assert_eq!(user.roles().len(), 1);
        assert_eq!(user.domain_events().len(), 2);
    }

    #[test]
    fn test_assign_two_roles_preserves_order() {
        let mut user = create_test_user();
        let role_a = role("editor");
        let role_b = role("reviewer");

        user.assign_role(&role_a);
        user.assign_role(&role_b);

        assert_eq!(user.roles().len(), 2);
        assert!(user.roles().contains(&role_a.id));
        assert!(user.roles().contains(&role_b.id));

        let events = user.domain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].payload(),
            &UserEvent::RoleAssigned(UserRoleAssigned {
                user_id: user.id(),
                role_id: role_a.id,
            })
        );
        assert_eq!(
            events[1].payload(),
            &UserEvent::RoleAssigned(UserRoleAssigned {
                user_id: user.id(),
                role_id: role_b.id,
            })
        );
    }

    #[test]
    fn test_assign_role_from_catalog() {
        let mut user = create_test_user();
        let admin = role("admin");
        let mut catalog = InMemoryRoleCatalog::new();
        catalog.insert(admin.clone());

        user.assign_role_from(&catalog, admin.id).unwrap();
        assert!(user.roles().contains(&admin.id));
        assert_eq!(user.domain_events().len(), 1);
    }

    #[test]
    fn test_assign_unknown_role_fails_with_not_found() {
        let mut user = create_test_user();
        let catalog = InMemoryRoleCatalog::new();
        let missing = RoleId(Uuid::new_v4());

        let result = user.assign_role_from(&catalog, missing);
        assert_eq!(result.unwrap_err(), UserError::RoleNotFound(missing));
        assert!(user.roles().is_empty());
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_has_permission_exact_match() {
        let mut user = create_test_user();
        user.set_permissions(BTreeSet::from([permission("menu.read")]));

        assert!(user.has_permission("menu.read"));
        assert!(!user.has_permission("menu.write"));
        assert!(!user.has_permission("MENU.READ"));
        assert!(!user.has_permission(""));
    }

    #[test]
    fn test_has_permission_on_empty_set_is_false() {
        let user = create_test_user();
        assert!(!user.has_permission("menu.read"));
    }

    #[test]
    fn test_has_permission_emits_no_events() {
        let mut user = create_test_user();
        user.set_permissions(BTreeSet::from([permission("menu.read")]));

        let _ = user.has_permission("menu.read");
        let _ = user.has_permission("menu.write");
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_record_login_updates_statistics() {
        let mut user = create_test_user();
        user.record_login();
        user.record_login();

        assert_eq!(user.login_count(), 2);
        assert!(user.last_login_at().is_some());
        assert_eq!(user.domain_events().len(), 2);
        assert_eq!(user.domain_events()[0].event_type(), "logged-in");
    }

    #[test]
    fn test_change_status_records_old_and_new_codes() {
        let mut user = create_test_user();
        user.change_status(EntityStatus::Archived);

        assert_eq!(user.status(), EntityStatus::Archived);
        assert_eq!(
            user.domain_events()[0].payload(),
            &UserEvent::StatusChanged(UserStatusChanged {
                user_id: user.id(),
                old_status: "active".to_string(),
                new_status: "archived".to_string(),
            })
        );
    }

    #[test]
    fn test_mixed_calls_emit_events_in_call_order() {
        let mut user = create_test_user();
        let admin = role("admin");

        user.change_password("old", "new").unwrap();
        let _ = user.has_permission("menu.read");
        user.assign_role(&admin);
        user.record_login();

        let types: Vec<_> = user
            .domain_events()
            .iter()
            .map(|r| r.event_type().to_string())
            .collect();
        assert_eq!(types, vec!["password-changed", "role-assigned", "logged-in"]);
    }

    #[test]
    fn test_clear_then_read_yields_empty() {
        let mut user = create_test_user();
        user.assign_role(&role("admin"));
        user.record_login();
        assert_eq!(user.domain_events().len(), 2);

        user.clear_domain_events();
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_clear_on_empty_buffer_is_noop() {
        let mut user = create_test_user();
        user.clear_domain_events();
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_take_drains_one_buffer_generation() {
        let mut user = create_test_user();
        user.assign_role(&role("admin"));

        let taken = user.take_domain_events();
        assert_eq!(taken.len(), 1);
        assert!(user.domain_events().is_empty());

        // Next generation starts fresh.
        user.record_login();
        assert_eq!(user.domain_events().len(), 1);
        assert_eq!(user.domain_events()[0].event_type(), "logged-in");
    }

    #[test]
    fn test_mutations_refresh_updated_at() {
        let mut user = create_test_user();
        let before = user.audit().updated_at();
        user.assign_role(&role("admin"));
        assert!(user.audit().updated_at() >= before);
    }

    #[test]
    fn test_version_bump_is_owned_by_persistence_layer() {
        let mut user = create_test_user();
        user.change_password("old", "new").unwrap();
        // Business methods never move the counter.
        assert_eq!(user.audit().version(), 0);

        user.audit_mut().bump_version();
        assert_eq!(user.audit().version(), 1);
    }
}
