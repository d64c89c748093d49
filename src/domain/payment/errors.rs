// ============================================================================
// Payment Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PaymentError {
    #[error("Invalid phone number: {0:?}")]
    InvalidPhoneNumber(String),

    #[error("Unknown mobile money provider: {0}")]
    UnknownProvider(String),

    #[error("Mobile money payments need a phone number and a provider")]
    MissingMobileMoneyDetails,
}
