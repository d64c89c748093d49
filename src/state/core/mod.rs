// ============================================================================
// State Core - Generic Abstractions
// ============================================================================
//
// No domain-specific code (no Cart, Order, Wallet) lives here.
//
// ============================================================================

pub mod aggregate;
pub mod event;

pub use aggregate::Aggregate;
pub use event::{DomainEvent, EventEnvelope};
