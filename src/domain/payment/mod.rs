// ============================================================================
// Payment Domain
// ============================================================================
//
// Payment-method choice and intent payloads. Intents are created against an
// order id returned by the backend; idempotency is the backend's job.
//
// ============================================================================

pub mod errors;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
