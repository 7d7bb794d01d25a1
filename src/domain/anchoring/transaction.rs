//! The anchoring transaction: a zero-amount self-payment carrying a content id.

use serde::{Deserialize, Serialize};

use super::value_objects::{ContentId, WalletAddress};

/// Network parameters a transaction must be built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParams {
    /// Suggested fee in microAlgos.
    pub fee: u64,
    pub min_fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    /// Base64 genesis hash.
    pub genesis_hash: String,
}

/// A payment ready to be handed to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub sender: WalletAddress,
    pub receiver: WalletAddress,
    pub amount: u64,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
    pub note: Vec<u8>,
}

impl UnsignedTransaction {
    /// Builds the zero-amount payment from `sender` to itself whose note is
    /// the content id.
    pub fn anchor(sender: &WalletAddress, content_id: &ContentId, params: &TransactionParams) -> Self {
        Self {
            sender: sender.clone(),
            receiver: sender.clone(),
            amount: 0,
            fee: params.fee.max(params.min_fee),
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash.clone(),
            note: content_id.as_str().as_bytes().to_vec(),
        }
    }

    pub fn is_self_payment(&self) -> bool {
        self.sender == self.receiver
    }

    /// The note decoded as text, if it is UTF-8.
    pub fn note_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.note).ok()
    }
}

/// Wallet-signed transaction bytes, opaque to this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction(Vec<u8>);

impl SignedTransaction {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB";

    fn params() -> TransactionParams {
        TransactionParams {
            fee: 0,
            min_fee: 1000,
            first_valid: 100,
            last_valid: 1100,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=".to_string(),
        }
    }

    #[test]
    fn anchor_is_zero_amount_self_payment() {
        let sender = WalletAddress::new(ADDRESS).unwrap();
        let cid = ContentId::from_hash("QmDoc").unwrap();

        let txn = UnsignedTransaction::anchor(&sender, &cid, &params());

        assert!(txn.is_self_payment());
        assert_eq!(txn.amount, 0);
        assert_eq!(txn.note, b"ipfs://QmDoc");
        assert_eq!(txn.note_text(), Some("ipfs://QmDoc"));
        assert_eq!(txn.first_valid, 100);
        assert_eq!(txn.genesis_id, "testnet-v1.0");
    }

    #[test]
    fn anchor_fee_never_below_minimum() {
        let sender = WalletAddress::new(ADDRESS).unwrap();
        let cid = ContentId::from_hash("QmDoc").unwrap();

        assert_eq!(UnsignedTransaction::anchor(&sender, &cid, &params()).fee, 1000);

        let mut busy = params();
        busy.fee = 2500;
        assert_eq!(UnsignedTransaction::anchor(&sender, &cid, &busy).fee, 2500);
    }
}
