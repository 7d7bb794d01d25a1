//! Wallet Adapters
//!
//! Signing happens in the user's browser wallet; the server-side
//! `InMemoryWallet` stands in for it in tests and local tooling.

mod in_memory;

pub use in_memory::InMemoryWallet;
