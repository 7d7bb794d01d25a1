//! Contract handlers: drafting, export, upload and publishing.

mod export_contract;
mod generate_contract;
mod publish_contract;
mod upload_document;

pub use export_contract::{export_basename, ExportContractCommand, ExportContractHandler};
pub use generate_contract::{resolve_response, ContractGenerator};
pub use publish_contract::{
    PublishContractCommand, PublishContractHandler, PublishError, PublishStep, PublishedContract,
};
pub use upload_document::{
    UploadDocumentCommand, UploadDocumentHandler, UploadError, UploadedDocument,
    ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES,
};
