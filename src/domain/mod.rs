// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific aggregates and business logic.
// Each aggregate has its own subdirectory with:
// - Value objects
// - Events
// - Errors
// - Aggregate implementation
//
// This layer builds on the generic contracts in src/core/.
//
// ============================================================================

pub mod user;

// Future aggregates can be added here:
// pub mod menu;
// pub mod dish;
