// ============================================================================
// Backend API - REST client and endpoint groups
// ============================================================================
//
// Each endpoint group is a trait so flows can be exercised against mocks;
// `ApiClient` implements all of them over HTTP.
//
// ============================================================================

pub mod analytics;
pub mod catalog;
pub mod client;
pub mod error;
pub mod orders;
pub mod pagination;
pub mod payments;
pub mod wallet;

pub use analytics::AnalyticsApi;
pub use catalog::CatalogApi;
pub use client::{ApiClient, ApiConfig, ReadRetryPolicy, TRANSACTION_CLOSED_MESSAGE};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use orders::{OrderScope, OrdersApi};
pub use pagination::{PageMeta, PageRequest, PagedList, Paginated};
pub use payments::{PaymentsApi, IDEMPOTENCY_KEY_HEADER};
pub use wallet::WalletApi;
