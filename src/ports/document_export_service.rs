//! Document Export Port - turns contract markdown into a downloadable file.
//!
//! The drafting flow always exports to PDF before pinning; HTML and the raw
//! markdown are offered for preview and download.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for rendering contract markdown into other formats.
///
/// Implementations must keep headings, lists and emphasis intact and report
/// converter failures as [`ExportError`] rather than producing empty output.
#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Render markdown to PDF bytes.
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Render markdown to a complete, standalone HTML document.
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError>;

    /// Whether the external converter needed for PDF is present.
    async fn is_available(&self) -> bool;
}

/// Output formats for an exported contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Markdown,
    #[default]
    Pdf,
    Html,
}

impl ExportFormat {
    /// MIME type sent with the file.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }

    /// Maps a filename extension back to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "pdf" => Some(ExportFormat::Pdf),
            "html" | "htm" => Some(ExportFormat::Html),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// A rendered contract ready for download or upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    /// Suggested filename, including the extension.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter (Pandoc) is not installed or not runnable.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    #[error("HTML conversion failed: {0}")]
    HtmlConversionFailed(String),

    #[error("Invalid markdown input: {0}")]
    InvalidInput(String),

    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    #[error("I/O error during export: {0}")]
    IoError(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfConversionFailed(reason.into())
    }

    pub fn io_error(reason: impl Into<String>) -> Self {
        Self::IoError(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_map_to_mime_and_extension() {
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ExportFormat::Html.extension(), "html");
        assert_eq!(ExportFormat::Markdown.extension(), "md");
    }

    #[test]
    fn default_format_is_pdf() {
        assert_eq!(ExportFormat::default(), ExportFormat::Pdf);
    }

    #[test]
    fn format_parses_from_string() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("htm".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn format_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&ExportFormat::Pdf).unwrap(), "\"pdf\"");
        let parsed: ExportFormat = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(parsed, ExportFormat::Markdown);
    }

    #[test]
    fn exported_document_names_file_from_format() {
        let doc = ExportedDocument::new(b"%PDF".to_vec(), ExportFormat::Pdf, "contract-1");
        assert_eq!(doc.filename, "contract-1.pdf");
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(doc.size_bytes(), 4);
    }

    #[test]
    fn document_export_service_is_object_safe() {
        fn check<T: DocumentExportService + ?Sized>() {}
        check::<dyn DocumentExportService>();
    }
}
