// ============================================================================
// Wallet Domain
// ============================================================================
//
// Read-only balance and history; deposits, withdrawals and transfers are
// requests the backend turns into new transactions.
//
// ============================================================================

pub mod errors;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
