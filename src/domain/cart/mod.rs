// ============================================================================
// Cart Domain
// ============================================================================
//
// In-memory cart lines keyed by variant. Single-supplier carts are not
// enforced here; checkout rejects mixed carts before anything is sent.
//
// ============================================================================

pub mod aggregate;
pub mod commands;
pub mod errors;
pub mod events;
pub mod value_objects;

pub use aggregate::*;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use value_objects::*;
