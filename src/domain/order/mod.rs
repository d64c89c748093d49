// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (Order, OrderLine, OrderStatus)
// - Status badges (one table for every screen)
// - Requests (CreateOrderPayload, StatusUpdate) and payload building
// - Errors (CheckoutError)
// - Checkout handler (cart → order → payment intent)
// - Tracker (re-fetch until a terminal status)
//
// ============================================================================

pub mod command_handler;
pub mod commands;
pub mod errors;
pub mod status;
pub mod tracker;
pub mod value_objects;

pub use command_handler::*;
pub use commands::*;
pub use errors::*;
pub use status::*;
pub use tracker::*;
pub use value_objects::*;
