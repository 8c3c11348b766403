use async_trait::async_trait;

use crate::application::ports::{PdfSplitter, PdfSplitterError};
use crate::domain::PageText;

use crate::infrastructure::text_processing::normalize_extracted_text;

/// Test double returning canned page text; assembled payloads encode the
/// requested page indices so tests can assert the page partition.
pub struct MockPdfSplitter {
    pages: Vec<PageText>,
}

impl MockPdfSplitter {
    pub fn with_pages<I, T>(raw_pages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let pages = raw_pages
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.into();
                let normalized = normalize_extracted_text(&raw);
                PageText::new(index, raw, normalized)
            })
            .collect();
        Self { pages }
    }
}

#[async_trait]
impl PdfSplitter for MockPdfSplitter {
    async fn extract_pages(&self, _data: &[u8]) -> Result<Vec<PageText>, PdfSplitterError> {
        if self.pages.is_empty() {
            return Err(PdfSplitterError::NoTextLayer);
        }
        Ok(self.pages.clone())
    }

    async fn assemble(&self, _data: &[u8], pages: &[usize]) -> Result<Vec<u8>, PdfSplitterError> {
        Ok(format!("pages:{pages:?}").into_bytes())
    }
}
