//! Document adapters - Implementations of the DocumentExportService port.
//!
//! - `PulldownExportService` - HTML via pulldown-cmark, PDF via Pandoc

mod pulldown_export_service;

pub use pulldown_export_service::PulldownExportService;
