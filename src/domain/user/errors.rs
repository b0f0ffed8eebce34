use super::value_objects::RoleId;

// ============================================================================
// User Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("current password does not match")]
    PasswordMismatch,

    #[error("new password cannot be empty")]
    EmptyPassword,

    #[error("role not found in catalog: {0}")]
    RoleNotFound(RoleId),
}
