//! AnchorService - records a content id on the ledger through the user's wallet.
//!
//! The service owns the connection state explicitly: callers `connect()`
//! before anchoring and `disconnect()` when done.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::anchoring::{
    ContentId, MicroAlgos, TransactionId, UnsignedTransaction, WalletAddress,
};
use crate::ports::{LedgerClient, LedgerError, WalletError, WalletProvider};

/// Network assumed when the node does not report its genesis id.
pub const FALLBACK_GENESIS_ID: &str = "testnet-v1.0";

/// Rounds to wait for an anchor transaction to confirm.
pub const CONFIRMATION_ROUNDS: u64 = 4;

/// Proof that a content id was written to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorReceipt {
    pub tx_id: TransactionId,
    pub confirmed_round: u64,
    pub content_id: ContentId,
}

#[derive(Debug, Clone, Error)]
pub enum AnchorError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Anchors content ids with a connected wallet.
pub struct AnchorService {
    wallet: Arc<dyn WalletProvider>,
    ledger: Arc<dyn LedgerClient>,
    account: RwLock<Option<WalletAddress>>,
}

impl AnchorService {
    pub fn new(wallet: Arc<dyn WalletProvider>, ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            wallet,
            ledger,
            account: RwLock::new(None),
        }
    }

    /// Connects the wallet on the ledger's network and remembers the account.
    pub async fn connect(&self) -> Result<WalletAddress, AnchorError> {
        let genesis_id = match self.ledger.genesis_id().await {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(error = %err, fallback = FALLBACK_GENESIS_ID, "genesis lookup failed");
                FALLBACK_GENESIS_ID.to_string()
            }
        };

        let address = self.wallet.connect(&genesis_id).await?;
        tracing::info!(
            wallet = self.wallet.wallet_type(),
            address = %address,
            network = %genesis_id,
            "wallet connected"
        );

        *self.account.write().await = Some(address.clone());
        Ok(address)
    }

    pub async fn disconnect(&self) {
        *self.account.write().await = None;
    }

    pub async fn connected_address(&self) -> Option<WalletAddress> {
        self.account.read().await.clone()
    }

    async fn require_address(&self) -> Result<WalletAddress, AnchorError> {
        self.connected_address().await.ok_or(AnchorError::NotConnected)
    }

    /// Builds the zero-amount self-payment carrying `content_id` as its note.
    pub async fn build_anchor_transaction(
        &self,
        content_id: &ContentId,
    ) -> Result<UnsignedTransaction, AnchorError> {
        let sender = self.require_address().await?;
        let params = self.ledger.suggested_params().await?;
        Ok(UnsignedTransaction::anchor(&sender, content_id, &params))
    }

    /// Builds, signs, submits and confirms an anchor transaction.
    pub async fn anchor(&self, content_id: &ContentId) -> Result<AnchorReceipt, AnchorError> {
        let transaction = self.build_anchor_transaction(content_id).await?;
        let signed = self.wallet.sign_transaction(&transaction).await?;
        let tx_id = self.ledger.submit_transaction(&signed).await?;

        tracing::info!(tx_id = %tx_id, content_id = %content_id, "anchor transaction submitted");

        let confirmed_round = self
            .ledger
            .wait_for_confirmation(&tx_id, CONFIRMATION_ROUNDS)
            .await?;

        Ok(AnchorReceipt {
            tx_id,
            confirmed_round,
            content_id: content_id.clone(),
        })
    }

    /// Balance of the connected account.
    pub async fn balance(&self) -> Result<MicroAlgos, AnchorError> {
        let address = self.require_address().await?;
        Ok(self.ledger.account_balance(&address).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ledger::InMemoryLedger;
    use crate::adapters::wallet::InMemoryWallet;
    use crate::domain::anchoring::{SignedTransaction, TransactionParams};
    use async_trait::async_trait;

    const ADDRESS: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    fn address() -> WalletAddress {
        WalletAddress::new(ADDRESS).unwrap()
    }

    fn content_id() -> ContentId {
        ContentId::from_hash("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG").unwrap()
    }

    fn service(wallet: &InMemoryWallet, ledger: &InMemoryLedger) -> AnchorService {
        AnchorService::new(Arc::new(wallet.clone()), Arc::new(ledger.clone()))
    }

    /// Ledger whose node cannot report a genesis id.
    struct NoGenesisLedger(InMemoryLedger);

    #[async_trait]
    impl LedgerClient for NoGenesisLedger {
        async fn genesis_id(&self) -> Result<String, LedgerError> {
            Err(LedgerError::network("connection refused"))
        }
        async fn suggested_params(&self) -> Result<TransactionParams, LedgerError> {
            self.0.suggested_params().await
        }
        async fn submit_transaction(
            &self,
            signed: &SignedTransaction,
        ) -> Result<TransactionId, LedgerError> {
            self.0.submit_transaction(signed).await
        }
        async fn wait_for_confirmation(
            &self,
            tx_id: &TransactionId,
            max_rounds: u64,
        ) -> Result<u64, LedgerError> {
            self.0.wait_for_confirmation(tx_id, max_rounds).await
        }
        async fn account_balance(
            &self,
            address: &WalletAddress,
        ) -> Result<MicroAlgos, LedgerError> {
            self.0.account_balance(address).await
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Connection
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn operations_require_connection() {
        let svc = service(&InMemoryWallet::new(address()), &InMemoryLedger::new());

        assert!(matches!(
            svc.build_anchor_transaction(&content_id()).await,
            Err(AnchorError::NotConnected)
        ));
        assert!(matches!(svc.anchor(&content_id()).await, Err(AnchorError::NotConnected)));
        assert!(matches!(svc.balance().await, Err(AnchorError::NotConnected)));
    }

    #[tokio::test]
    async fn connect_uses_ledger_network() {
        let wallet = InMemoryWallet::new(address());
        let svc = service(&wallet, &InMemoryLedger::new());

        assert_eq!(svc.connect().await.unwrap(), address());
        assert_eq!(svc.connected_address().await, Some(address()));
        assert_eq!(wallet.connected_networks(), vec!["testnet-v1.0".to_string()]);
    }

    #[tokio::test]
    async fn connect_falls_back_when_genesis_lookup_fails() {
        let wallet = InMemoryWallet::new(address());
        let svc = AnchorService::new(
            Arc::new(wallet.clone()),
            Arc::new(NoGenesisLedger(InMemoryLedger::new())),
        );

        svc.connect().await.unwrap();

        assert_eq!(wallet.connected_networks(), vec![FALLBACK_GENESIS_ID.to_string()]);
    }

    #[tokio::test]
    async fn disconnect_clears_account() {
        let svc = service(&InMemoryWallet::new(address()), &InMemoryLedger::new());
        svc.connect().await.unwrap();

        svc.disconnect().await;

        assert!(svc.connected_address().await.is_none());
        assert!(matches!(svc.balance().await, Err(AnchorError::NotConnected)));
    }

    #[tokio::test]
    async fn rejected_connect_leaves_service_disconnected() {
        let svc = service(&InMemoryWallet::rejecting(address()), &InMemoryLedger::new());

        assert!(matches!(
            svc.connect().await,
            Err(AnchorError::Wallet(WalletError::Rejected))
        ));
        assert!(svc.connected_address().await.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Anchoring
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn anchor_transaction_is_zero_self_payment_with_cid_note() {
        let svc = service(&InMemoryWallet::new(address()), &InMemoryLedger::new());
        svc.connect().await.unwrap();

        let tx = svc.build_anchor_transaction(&content_id()).await.unwrap();

        assert!(tx.is_self_payment());
        assert_eq!(tx.amount, 0);
        assert_eq!(tx.fee, 1000);
        assert_eq!(tx.note, content_id().as_str().as_bytes());
    }

    #[tokio::test]
    async fn anchor_signs_submits_and_confirms() {
        let wallet = InMemoryWallet::new(address());
        let ledger = InMemoryLedger::new();
        let svc = service(&wallet, &ledger);
        svc.connect().await.unwrap();

        let receipt = svc.anchor(&content_id()).await.unwrap();

        assert_eq!(receipt.content_id, content_id());
        assert_eq!(receipt.confirmed_round, 1);
        let submitted = ledger.submitted(&receipt.tx_id).await.unwrap();
        let decoded = InMemoryWallet::decode(&submitted).unwrap();
        assert_eq!(decoded.note_text(), Some(content_id().as_str()));
        assert_eq!(wallet.signed_transactions().len(), 1);
    }

    #[tokio::test]
    async fn ledger_rejection_is_reported() {
        let svc = service(
            &InMemoryWallet::new(address()),
            &InMemoryLedger::rejecting("overspend"),
        );
        svc.connect().await.unwrap();

        assert!(matches!(
            svc.anchor(&content_id()).await,
            Err(AnchorError::Ledger(LedgerError::Rejected(_)))
        ));
    }

    #[tokio::test]
    async fn balance_reads_connected_account() {
        let ledger = InMemoryLedger::new();
        ledger.set_balance(address(), MicroAlgos(2_500_000)).await;
        let svc = service(&InMemoryWallet::new(address()), &ledger);
        svc.connect().await.unwrap();

        let balance = svc.balance().await.unwrap();

        assert_eq!(balance, MicroAlgos(2_500_000));
        assert_eq!(balance.as_algos(), 2.5);
    }
}
