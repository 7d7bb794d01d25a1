//! Anchoring domain: identifiers and the transaction that records a
//! document's content id on the ledger.

mod transaction;
mod value_objects;

pub use transaction::{SignedTransaction, TransactionParams, UnsignedTransaction};
pub use value_objects::{ContentId, DocumentDigest, MicroAlgos, TransactionId, WalletAddress};
