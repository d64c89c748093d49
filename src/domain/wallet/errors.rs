use rust_decimal::Decimal;

// ============================================================================
// Wallet Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WalletError {
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
}
