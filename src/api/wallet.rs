use async_trait::async_trait;

use super::client::ApiClient;
use super::error::ApiError;
use super::pagination::{PageRequest, Paginated};
use crate::domain::wallet::{DepositRequest, Transaction, TransferRequest, Wallet, WithdrawRequest};

// ============================================================================
// Wallet Endpoints
// ============================================================================
//
// GET  /wallet
// GET  /wallet/transactions
// POST /wallet/deposit | /wallet/withdraw | /wallet/transfer
//
// Movements come back as the transaction the backend recorded.
//
// ============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletApi: Send + Sync {
    async fn get_wallet(&self) -> Result<Wallet, ApiError>;

    async fn list_transactions(&self, page: PageRequest) -> Result<Paginated<Transaction>, ApiError>;

    async fn deposit(&self, request: &DepositRequest) -> Result<Transaction, ApiError>;

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<Transaction, ApiError>;

    async fn transfer(&self, request: &TransferRequest) -> Result<Transaction, ApiError>;
}

#[async_trait]
impl WalletApi for ApiClient {
    async fn get_wallet(&self) -> Result<Wallet, ApiError> {
        let url = self.endpoint(&["wallet"])?;
        self.send("wallet.get", self.get(url)).await
    }

    async fn list_transactions(&self, page: PageRequest) -> Result<Paginated<Transaction>, ApiError> {
        let url = self.endpoint(&["wallet", "transactions"])?;
        self.send("wallet.transactions", self.get(url).query(&page)).await
    }

    async fn deposit(&self, request: &DepositRequest) -> Result<Transaction, ApiError> {
        let url = self.endpoint(&["wallet", "deposit"])?;
        let transaction: Transaction = self.send("wallet.deposit", self.post(url, request)).await?;
        tracing::info!(transaction_id = %transaction.id, amount = %request.amount, "💰 Deposit requested");
        Ok(transaction)
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<Transaction, ApiError> {
        let url = self.endpoint(&["wallet", "withdraw"])?;
        let transaction: Transaction = self.send("wallet.withdraw", self.post(url, request)).await?;
        tracing::info!(transaction_id = %transaction.id, amount = %request.amount, "Withdrawal requested");
        Ok(transaction)
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<Transaction, ApiError> {
        let url = self.endpoint(&["wallet", "transfer"])?;
        let transaction: Transaction = self.send("wallet.transfer", self.post(url, request)).await?;
        tracing::info!(
            transaction_id = %transaction.id,
            amount = %request.amount,
            recipient = %request.recipient_phone,
            "Transfer requested"
        );
        Ok(transaction)
    }
}
