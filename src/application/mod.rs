//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnchorError, AnchorReceipt, AnchorService, ContractGenerator, ExportContractCommand,
    ExportContractHandler, PublishContractCommand, PublishContractHandler, PublishError,
    PublishStep, PublishedContract, UploadDocumentCommand, UploadDocumentHandler, UploadError,
    UploadedDocument,
};
