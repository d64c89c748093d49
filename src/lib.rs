// ============================================================================
// Marketplace Client
// ============================================================================
//
// Client core for a multi-sided commerce marketplace:
// - Cart kept in a session store (one line per variant)
// - Single-supplier checkout with a payment intent per order
// - Order history, status badges and re-fetch tracking
// - Wallet, catalog and analytics reads
// - Read retry policy for transient backend failures
//
// ============================================================================

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod state;
pub mod utils;
