use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{PdfSplitter, PdfSplitterError};
use crate::domain::PageText;

use crate::infrastructure::text_processing::normalize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// `lopdf`-backed page access. Parsing and re-serialization are CPU-bound,
/// so both operations run on the blocking pool under a timeout.
#[derive(Default)]
pub struct LopdfSplitter;

impl LopdfSplitter {
    pub fn new() -> Self {
        Self
    }

    fn read_pages(data: &[u8]) -> Result<Vec<PageText>, PdfSplitterError> {
        let doc = Document::load_mem(data)
            .map_err(|e| PdfSplitterError::InvalidPdf(format!("failed to parse PDF: {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());
        let mut any_text = false;

        for (index, page_number) in page_numbers.iter().enumerate() {
            let raw = doc.extract_text(&[*page_number]).unwrap_or_default();
            if !raw.trim().is_empty() {
                any_text = true;
            }
            let normalized = normalize_extracted_text(&raw);
            pages.push(PageText::new(index, raw, normalized));
        }

        if pages.is_empty() || !any_text {
            return Err(PdfSplitterError::NoTextLayer);
        }

        Ok(pages)
    }

    fn build_subset(data: &[u8], pages: &[usize]) -> Result<Vec<u8>, PdfSplitterError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| PdfSplitterError::InvalidPdf(format!("failed to parse PDF: {e}")))?;

        let total_pages = doc.get_pages().len() as u32;
        // lopdf numbers pages from 1; segment page indices are 0-based.
        let keep: HashSet<u32> = pages.iter().map(|index| *index as u32 + 1).collect();
        let delete: Vec<u32> = (1..=total_pages)
            .filter(|number| !keep.contains(number))
            .collect();

        doc.delete_pages(&delete);
        doc.prune_objects();

        let mut payload = Vec::new();
        doc.save_to(&mut payload)
            .map_err(|e| PdfSplitterError::AssemblyFailed(e.to_string()))?;
        Ok(payload)
    }
}

#[async_trait]
impl PdfSplitter for LopdfSplitter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>, PdfSplitterError> {
        let owned = data.to_vec();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(&owned)),
        )
        .await
        .map_err(|_| PdfSplitterError::Timeout)?
        .map_err(|e| PdfSplitterError::InvalidPdf(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");
        Ok(pages)
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len(), pages = pages.len()))]
    async fn assemble(&self, data: &[u8], pages: &[usize]) -> Result<Vec<u8>, PdfSplitterError> {
        let owned = data.to_vec();
        let page_indices = pages.to_vec();

        let payload = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::build_subset(&owned, &page_indices)),
        )
        .await
        .map_err(|_| PdfSplitterError::Timeout)?
        .map_err(|e| PdfSplitterError::AssemblyFailed(format!("task join error: {e}")))??;

        tracing::debug!(payload_bytes = payload.len(), "Segment payload assembled");
        Ok(payload)
    }
}
