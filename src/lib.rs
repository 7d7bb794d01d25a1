//! BlockSign - AI-drafted contracts, pinned to IPFS and anchored on Algorand.
//!
//! The drafting core turns whatever a language model replies into a
//! well-formed contract record and never fails. Around it, documents are
//! exported, pinned by content address and anchored in a ledger
//! transaction note signed by the user's wallet.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
