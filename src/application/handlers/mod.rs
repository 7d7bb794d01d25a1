//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod anchoring;
pub mod contract;

pub use anchoring::{
    AnchorError, AnchorReceipt, AnchorService, CONFIRMATION_ROUNDS, FALLBACK_GENESIS_ID,
};
pub use contract::{
    export_basename, resolve_response, ContractGenerator, ExportContractCommand,
    ExportContractHandler, PublishContractCommand, PublishContractHandler, PublishError,
    PublishStep, PublishedContract, UploadDocumentCommand, UploadDocumentHandler, UploadError,
    UploadedDocument, ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES,
};
