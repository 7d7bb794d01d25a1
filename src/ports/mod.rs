//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Drafting
//!
//! - `AIProvider` - Generative model that drafts the contract text
//! - `DocumentExportService` - Markdown to PDF/HTML rendering
//!
//! ## Publishing
//!
//! - `ContentStorage` - Content-addressed pinning (IPFS)
//! - `LedgerClient` - Ledger node for params, submission and balances
//! - `WalletProvider` - User wallet that owns the signing key

mod ai_provider;
mod content_storage;
mod document_export_service;
mod ledger_client;
mod wallet_provider;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    RequestMetadata, TokenUsage,
};
pub use content_storage::{ContentStorage, StorageError};
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use ledger_client::{LedgerClient, LedgerError};
pub use wallet_provider::{WalletError, WalletProvider};
