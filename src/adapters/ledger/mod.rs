//! Ledger Adapters
//!
//! Implementations of the LedgerClient port.
//!
//! - **AlgodClient** - Algorand node REST API
//! - **InMemoryLedger** - Instant-confirmation ledger (testing/development)

mod algod;
mod in_memory;

pub use algod::{AlgodClient, AlgodConfig, DEFAULT_ALGOD_URL, DEFAULT_TOKEN_HEADER};
pub use in_memory::InMemoryLedger;
