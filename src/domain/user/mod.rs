// ============================================================================
// User Domain - Account Aggregate
// ============================================================================
//
// All user-specific code lives here:
// - Value objects (UserProfile, Role, Permission, ...)
// - Events (UserPasswordChanged, UserRoleAssigned, ...)
// - Errors (UserError enum)
// - Role catalog boundary
// - Aggregate (User with business logic)
//
// The generic entity/event contracts live in src/core/.
//
// ============================================================================

pub mod aggregate;
pub mod catalog;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use aggregate::User;
pub use catalog::{InMemoryRoleCatalog, RoleCatalog};
pub use errors::UserError;
pub use events::*;
pub use value_objects::*;
