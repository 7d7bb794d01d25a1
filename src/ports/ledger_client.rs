//! Ledger Client Port - read network state and submit signed transactions.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::anchoring::{
    MicroAlgos, SignedTransaction, TransactionId, TransactionParams, WalletAddress,
};

/// Port for the public ledger node.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Identifier of the network the node serves (e.g. `testnet-v1.0`).
    async fn genesis_id(&self) -> Result<String, LedgerError>;

    /// Parameters for building a transaction valid from the current round.
    async fn suggested_params(&self) -> Result<TransactionParams, LedgerError>;

    /// Broadcast a signed transaction.
    async fn submit_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError>;

    /// Wait until the transaction is confirmed, giving up after `max_rounds`.
    ///
    /// Returns the round it was confirmed in.
    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        max_rounds: u64,
    ) -> Result<u64, LedgerError>;

    /// Balance of an account.
    async fn account_balance(&self, address: &WalletAddress) -> Result<MicroAlgos, LedgerError>;
}

/// Errors returned by a ledger node.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Node answered with a non-success status.
    #[error("ledger node returned {status}: {detail}")]
    Node { status: u16, detail: String },

    /// Node dropped the transaction from its pool.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction {tx_id} not confirmed after {rounds} rounds")]
    ConfirmationTimeout { tx_id: String, rounds: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    pub fn node(status: u16, detail: impl Into<String>) -> Self {
        Self::Node {
            status,
            detail: detail.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_error_messages() {
        assert_eq!(
            LedgerError::node(400, "overspend").to_string(),
            "ledger node returned 400: overspend"
        );
        let err = LedgerError::ConfirmationTimeout {
            tx_id: "TX".to_string(),
            rounds: 4,
        };
        assert_eq!(err.to_string(), "transaction TX not confirmed after 4 rounds");
    }

    #[test]
    fn ledger_client_is_object_safe() {
        fn check<T: LedgerClient + ?Sized>() {}
        check::<dyn LedgerClient>();
    }
}
