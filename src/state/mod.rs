// ============================================================================
// Client State - Aggregate infrastructure and the session store
// ============================================================================

pub mod core;
pub mod session;

pub use self::core::*;
pub use session::*;
