use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::DomainEvent;

use super::value_objects::RoleId;

// ============================================================================
// User Domain Events
// ============================================================================
//
// Events carry identifiers and timestamps only. Credentials never appear
// in an event payload: events may be logged or published outside the
// trust boundary of the aggregate.
//
// ============================================================================

/// Union type for all user events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UserEvent {
    PasswordChanged(UserPasswordChanged),
    RoleAssigned(UserRoleAssigned),
    LoggedIn(UserLoggedIn),
    StatusChanged(UserStatusChanged),
}

impl DomainEvent for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::PasswordChanged(_) => "password-changed",
            UserEvent::RoleAssigned(_) => "role-assigned",
            UserEvent::LoggedIn(_) => "logged-in",
            UserEvent::StatusChanged(_) => "status-changed",
        }
    }

    fn aggregate_type(&self) -> &'static str {
        "user"
    }
}

// Individual event payloads

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPasswordChanged {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRoleAssigned {
    pub user_id: Uuid,
    pub role_id: RoleId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLoggedIn {
    pub user_id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatusChanged {
    pub user_id: Uuid,
    pub old_status: String,
    pub new_status: String,
}
