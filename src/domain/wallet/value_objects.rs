use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::WalletError;
use crate::domain::ids::TransactionId;
use crate::domain::payment::{MobileMoneyProvider, PhoneNumber};

// ============================================================================
// Wallet Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    TransferIn,
    TransferOut,
    Payment,
    Refund,
    #[serde(other)]
    Unknown,
}

impl TransactionType {
    /// Money leaves the wallet
    pub fn is_debit(&self) -> bool {
        matches!(
            self,
            TransactionType::Withdrawal | TransactionType::TransferOut | TransactionType::Payment
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Amount with its sign from the wallet's point of view
    pub fn signed_amount(&self) -> Decimal {
        if self.transaction_type.is_debit() {
            -self.amount.abs()
        } else {
            self.amount.abs()
        }
    }
}

/// Per-user stored-value balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

fn positive(amount: Decimal) -> Result<Decimal, WalletError> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Body of `POST /wallet/deposit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<MobileMoneyProvider>,
}

impl DepositRequest {
    pub fn new(
        amount: Decimal,
        phone_number: Option<PhoneNumber>,
        provider: Option<MobileMoneyProvider>,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            amount: positive(amount)?,
            phone_number,
            provider,
        })
    }
}

/// Body of `POST /wallet/withdraw`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<MobileMoneyProvider>,
}

impl WithdrawRequest {
    pub fn new(
        amount: Decimal,
        phone_number: Option<PhoneNumber>,
        provider: Option<MobileMoneyProvider>,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            amount: positive(amount)?,
            phone_number,
            provider,
        })
    }
}

/// Body of `POST /wallet/transfer`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub recipient_phone: PhoneNumber,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransferRequest {
    pub fn new(
        recipient_phone: PhoneNumber,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            recipient_phone,
            amount: positive(amount)?,
            description: description.filter(|text| !text.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_wallet_deserialization() {
        let wallet: Wallet = serde_json::from_value(json!({
            "balance": "1500.00",
            "currency": "XOF",
            "transactions": [{
                "id": "t1",
                "type": "TRANSFER_OUT",
                "amount": "200",
                "status": "COMPLETED",
                "createdAt": "2026-03-01T10:00:00Z"
            }, {
                "id": "t2",
                "type": "CASHBACK",
                "amount": 5,
                "status": "SETTLING",
                "createdAt": "2026-03-02T10:00:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(wallet.currency, "XOF");
        assert_eq!(wallet.transactions[0].signed_amount(), Decimal::from(-200));
        assert_eq!(wallet.transactions[1].transaction_type, TransactionType::Unknown);
        assert_eq!(wallet.transactions[1].status, TransactionStatus::Unknown);
        assert!(wallet.can_cover(Decimal::from(1500)));
        assert!(!wallet.can_cover(Decimal::from_str("1500.01").unwrap()));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        assert_eq!(
            DepositRequest::new(Decimal::ZERO, None, None),
            Err(WalletError::NonPositiveAmount(Decimal::ZERO))
        );
        assert!(WithdrawRequest::new(Decimal::from(-5), None, None).is_err());

        let phone = PhoneNumber::parse("+22501020304").unwrap();
        assert!(TransferRequest::new(phone, Decimal::NEGATIVE_ONE, None).is_err());
    }

    #[test]
    fn test_transfer_wire_shape() {
        let phone = PhoneNumber::parse("+22501020304").unwrap();
        let request = TransferRequest::new(phone, Decimal::from(250), Some("  ".to_string())).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "recipientPhone": "+22501020304", "amount": "250" })
        );
    }

    #[test]
    fn test_deposit_wire_shape() {
        let request = DepositRequest::new(
            Decimal::from(1000),
            Some(PhoneNumber::parse("0701020304").unwrap()),
            Some(MobileMoneyProvider::Wave),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "amount": "1000", "phoneNumber": "0701020304", "provider": "WAVE" })
        );
    }
}
