//! Wallet Provider Port - the user's signing wallet.
//!
//! The service never holds keys. It asks the wallet for an address and for
//! signatures over transactions it has built.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::anchoring::{SignedTransaction, UnsignedTransaction, WalletAddress};

/// Port for a signing wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect to the wallet on the given network and return the active account.
    async fn connect(&self, genesis_id: &str) -> Result<WalletAddress, WalletError>;

    /// Sign a transaction with the key for its sender.
    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, WalletError>;

    /// Short wallet type label (e.g. "lute").
    fn wallet_type(&self) -> &str;
}

/// Wallet failures.
#[derive(Debug, Clone, Error)]
pub enum WalletError {
    /// Wallet exposed no accounts.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// User declined the request in the wallet.
    #[error("request rejected by user")]
    Rejected,

    /// The wallet holds no key for the transaction sender.
    #[error("no signing key for {0}")]
    UnknownSigner(String),

    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}
