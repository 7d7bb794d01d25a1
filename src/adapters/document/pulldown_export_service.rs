//! Contract export adapter: pulldown-cmark for HTML, Pandoc for PDF.
//!
//! HTML rendering is pure Rust and always available. PDF rendering shells
//! out to Pandoc with the XeLaTeX engine so Turkish glyphs survive.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::contract::{detect_language, Locale};
use crate::ports::{DocumentExportService, ExportError};

const DEFAULT_PDF_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAIN_FONT: &str = "DejaVu Sans";

/// Export service using pulldown-cmark for HTML and Pandoc for PDF.
///
/// # Example
///
/// ```rust,ignore
/// let service = PulldownExportService::new().with_pdf_timeout(60);
///
/// let html = service.to_html("# SÖZLEŞME\n\nMadde 1").await?;
/// let pdf = service.to_pdf("# SÖZLEŞME\n\nMadde 1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// Path to pandoc executable. If None, PATH is searched.
    pandoc_path: Option<String>,
    pdf_timeout_secs: u64,
    /// Font passed to XeLaTeX as `mainfont`.
    main_font: String,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self::new()
    }
}

impl PulldownExportService {
    pub fn new() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
            main_font: DEFAULT_MAIN_FONT.to_string(),
        }
    }

    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    pub fn with_pdf_timeout(mut self, timeout_secs: u64) -> Self {
        self.pdf_timeout_secs = timeout_secs;
        self
    }

    pub fn with_main_font(mut self, font: impl Into<String>) -> Self {
        self.main_font = font.into();
        self
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn pandoc_args(&self, locale: Locale) -> Vec<String> {
        vec![
            "-f".to_string(),
            "markdown".to_string(),
            "-t".to_string(),
            "pdf".to_string(),
            "--pdf-engine=xelatex".to_string(),
            "-V".to_string(),
            "geometry:margin=2.5cm".to_string(),
            "-V".to_string(),
            "fontsize=11pt".to_string(),
            "-V".to_string(),
            format!("mainfont={}", self.main_font),
            "-V".to_string(),
            format!("lang={}", locale.tag()),
        ]
    }

    /// Wrap rendered HTML in a standalone document.
    fn wrap_html(&self, body: &str, title: &str, locale: Locale) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="contract-document">
{body}
    </article>
</body>
</html>"#,
            lang = locale.tag(),
            title = html_escape(title),
            css = CONTRACT_CSS,
            body = body
        )
    }

    /// First level-one heading, stripped of emphasis markers.
    fn extract_title(&self, markdown: &str, locale: Locale) -> String {
        markdown
            .lines()
            .filter_map(|line| line.trim().strip_prefix("# "))
            .map(|title| title.trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace()))
            .find(|title| !title.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match locale {
                Locale::Turkish => "Sözleşme".to_string(),
                Locale::English => "Contract".to_string(),
            })
    }

    async fn check_pandoc(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if markdown.trim().is_empty() {
            return Err(ExportError::InvalidInput("contract text is empty".to_string()));
        }
        if !self.check_pandoc().await {
            return Err(ExportError::service_unavailable(
                "Pandoc is not installed; PDF export requires pandoc and xelatex",
            ));
        }

        let locale = detect_language(markdown);
        let mut child = Command::new(self.pandoc_command())
            .args(self.pandoc_args(locale))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("Failed to start Pandoc: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ExportError::io_error(format!("Failed to write to Pandoc: {}", e)))?;
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.pdf_timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| ExportError::Timeout(self.pdf_timeout_secs))?
        .map_err(|e| ExportError::pdf_failed(format!("Pandoc execution failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::pdf_failed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION;

        let mut body = String::new();
        html::push_html(&mut body, Parser::new_ext(markdown, options));

        let locale = detect_language(markdown);
        let title = self.extract_title(markdown, locale);
        Ok(self.wrap_html(&body, &title, locale))
    }

    async fn is_available(&self) -> bool {
        self.check_pandoc().await
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CONTRACT_CSS: &str = r#"
body {
    font-family: Georgia, 'Times New Roman', serif;
    font-size: 15px;
    line-height: 1.7;
    color: #111827;
    max-width: 820px;
    margin: 0 auto;
    padding: 2rem;
}

.contract-document h1 {
    text-align: center;
    font-size: 1.6rem;
    letter-spacing: 0.04em;
    margin-bottom: 2rem;
}

.contract-document h2 {
    font-size: 1.15rem;
    border-bottom: 1px solid #d1d5db;
    padding-bottom: 0.2rem;
    margin-top: 1.8rem;
}

.contract-document strong {
    font-weight: 600;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th, td {
    padding: 0.4rem;
    border: 1px solid #d1d5db;
    text-align: left;
}

@media print {
    body {
        font-size: 11pt;
        padding: 0;
    }

    h2 {
        page-break-after: avoid;
    }
}
"#;
