// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each concern has its own subdirectory with value objects, errors and,
// where state changes locally, commands, events and an aggregate. Order
// state is owned by the backend; the client holds read-mostly copies.
//
// ============================================================================

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod ids;
pub mod order;
pub mod payment;
pub mod wallet;
