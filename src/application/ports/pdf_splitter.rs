use async_trait::async_trait;

use crate::domain::PageText;

/// Page-level access to a source PDF: per-page text extraction for boundary
/// detection, and page-subset payload assembly for segment output.
#[async_trait]
pub trait PdfSplitter: Send + Sync {
    /// Extract text for every page, in page order. Page text is normalized
    /// before being returned.
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>, PdfSplitterError>;

    /// Assemble a standalone PDF payload from the given 0-based page indices
    /// of the source document.
    async fn assemble(&self, data: &[u8], pages: &[usize]) -> Result<Vec<u8>, PdfSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfSplitterError {
    #[error("invalid PDF: {0}")]
    InvalidPdf(String),
    #[error("no text layer found in PDF")]
    NoTextLayer,
    #[error("payload assembly failed: {0}")]
    AssemblyFailed(String),
    #[error("extraction timed out")]
    Timeout,
}
