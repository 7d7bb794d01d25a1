//! In-memory wallet for tests and local development.
//!
//! Holds no real key. "Signing" serializes the transaction so tests can
//! decode what was signed.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::anchoring::{SignedTransaction, UnsignedTransaction, WalletAddress};
use crate::ports::{WalletError, WalletProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    Approve,
    Reject,
    NoAccounts,
}

#[derive(Debug, Default)]
struct WalletLog {
    networks: Vec<String>,
    signed: Vec<UnsignedTransaction>,
}

/// Wallet with a single fixed account.
#[derive(Debug, Clone)]
pub struct InMemoryWallet {
    address: WalletAddress,
    behavior: Behavior,
    log: Arc<Mutex<WalletLog>>,
}

impl InMemoryWallet {
    pub fn new(address: WalletAddress) -> Self {
        Self {
            address,
            behavior: Behavior::Approve,
            log: Arc::new(Mutex::new(WalletLog::default())),
        }
    }

    /// Wallet whose user declines every request.
    pub fn rejecting(address: WalletAddress) -> Self {
        Self {
            behavior: Behavior::Reject,
            ..Self::new(address)
        }
    }

    /// Wallet that exposes no accounts on connect.
    pub fn empty(address: WalletAddress) -> Self {
        Self {
            behavior: Behavior::NoAccounts,
            ..Self::new(address)
        }
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    /// Networks passed to `connect`, in call order.
    pub fn connected_networks(&self) -> Vec<String> {
        self.locked().networks.clone()
    }

    /// Transactions signed so far.
    pub fn signed_transactions(&self) -> Vec<UnsignedTransaction> {
        self.locked().signed.clone()
    }

    /// Recovers the transaction behind bytes produced by this wallet.
    pub fn decode(signed: &SignedTransaction) -> Option<UnsignedTransaction> {
        serde_json::from_slice(signed.as_bytes()).ok()
    }

    fn locked(&self) -> MutexGuard<'_, WalletLog> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl WalletProvider for InMemoryWallet {
    async fn connect(&self, genesis_id: &str) -> Result<WalletAddress, WalletError> {
        self.locked().networks.push(genesis_id.to_string());
        match self.behavior {
            Behavior::Approve => Ok(self.address.clone()),
            Behavior::Reject => Err(WalletError::Rejected),
            Behavior::NoAccounts => Err(WalletError::NoAccounts),
        }
    }

    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, WalletError> {
        if self.behavior == Behavior::Reject {
            return Err(WalletError::Rejected);
        }
        if transaction.sender != self.address {
            return Err(WalletError::UnknownSigner(transaction.sender.to_string()));
        }

        let bytes = serde_json::to_vec(transaction)
            .map_err(|e| WalletError::Unavailable(e.to_string()))?;
        self.locked().signed.push(transaction.clone());
        Ok(SignedTransaction::new(bytes))
    }

    fn wallet_type(&self) -> &str {
        "in-memory"
    }
}
