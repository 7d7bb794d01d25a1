//! In-memory ledger for tests and offline development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::anchoring::{
    DocumentDigest, MicroAlgos, SignedTransaction, TransactionId, TransactionParams,
    WalletAddress,
};
use crate::ports::{LedgerClient, LedgerError};

const GENESIS_ID: &str = "testnet-v1.0";
const GENESIS_HASH: &str = "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=";
const MIN_FEE: u64 = 1000;

#[derive(Debug, Default)]
struct LedgerState {
    round: u64,
    balances: HashMap<WalletAddress, MicroAlgos>,
    /// Submitted transactions with the round they were confirmed in.
    confirmed: HashMap<TransactionId, (SignedTransaction, u64)>,
}

/// Ledger that confirms every submission in the next round.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
    reject_submissions: Option<String>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every submission fail with a pool error.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_submissions: Some(reason.into()),
            ..Self::default()
        }
    }

    pub async fn set_balance(&self, address: WalletAddress, amount: MicroAlgos) {
        self.state.write().await.balances.insert(address, amount);
    }

    pub async fn submitted(&self, tx_id: &TransactionId) -> Option<SignedTransaction> {
        self.state
            .read()
            .await
            .confirmed
            .get(tx_id)
            .map(|(signed, _)| signed.clone())
    }

    pub async fn submission_count(&self) -> usize {
        self.state.read().await.confirmed.len()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn genesis_id(&self) -> Result<String, LedgerError> {
        Ok(GENESIS_ID.to_string())
    }

    async fn suggested_params(&self) -> Result<TransactionParams, LedgerError> {
        let round = self.state.read().await.round;
        Ok(TransactionParams {
            fee: 0,
            min_fee: MIN_FEE,
            first_valid: round,
            last_valid: round + 1000,
            genesis_id: GENESIS_ID.to_string(),
            genesis_hash: GENESIS_HASH.to_string(),
        })
    }

    async fn submit_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TransactionId, LedgerError> {
        if let Some(reason) = &self.reject_submissions {
            return Err(LedgerError::Rejected(reason.clone()));
        }
        if signed.is_empty() {
            return Err(LedgerError::node(400, "empty transaction"));
        }

        let digest = DocumentDigest::of(signed.as_bytes());
        let tx_id = TransactionId::new(digest.as_str()[..52].to_ascii_uppercase())
            .map_err(|e| LedgerError::invalid_response(e.to_string()))?;

        let mut state = self.state.write().await;
        state.round += 1;
        let round = state.round;
        state.confirmed.insert(tx_id.clone(), (signed.clone(), round));
        Ok(tx_id)
    }

    async fn wait_for_confirmation(
        &self,
        tx_id: &TransactionId,
        max_rounds: u64,
    ) -> Result<u64, LedgerError> {
        self.state
            .read()
            .await
            .confirmed
            .get(tx_id)
            .map(|(_, round)| *round)
            .ok_or_else(|| LedgerError::ConfirmationTimeout {
                tx_id: tx_id.to_string(),
                rounds: max_rounds,
            })
    }

    async fn account_balance(&self, address: &WalletAddress) -> Result<MicroAlgos, LedgerError> {
        Ok(self
            .state
            .read()
            .await
            .balances
            .get(address)
            .copied()
            .unwrap_or_default())
    }
}
