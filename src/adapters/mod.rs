//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini drafting model and a scripted mock
//! - `document` - Markdown export to HTML and PDF
//! - `storage` - Pinata pinning and in-memory storage
//! - `ledger` - Algod node client and in-memory ledger
//! - `wallet` - In-memory signing wallet
//! - `http` - Axum REST surface

pub mod ai;
pub mod document;
pub mod http;
pub mod ledger;
pub mod storage;
pub mod wallet;
