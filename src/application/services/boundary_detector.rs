use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{DocumentBoundary, PageText};

use super::metadata::normalize_date;

/// Characters of page text examined for the header phrase. Headers appear at
/// the top of a document's first page; scanning further produces false
/// positives from tables of contents and cross-references.
const HEADER_SCAN_CHARS: usize = 500;

static DISTRICT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"District ID:\s*(\d+)").unwrap());
static DOCUMENT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"IEP Date:\s*(\d{1,2}/\d{1,2}/\d{4})").unwrap());

/// Single-header boundary detection: every page whose leading text matches
/// the configured header phrase starts a new logical document.
pub struct BoundaryDetector {
    header: Regex,
}

impl BoundaryDetector {
    pub fn new(header_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            header: Regex::new(header_pattern)?,
        })
    }

    pub fn detect(&self, pages: &[PageText]) -> Vec<DocumentBoundary> {
        let mut boundaries = Vec::new();

        tracing::debug!(total_pages = pages.len(), "Scanning pages for document headers");
        for page in pages {
            let head: String = page.normalized.chars().take(HEADER_SCAN_CHARS).collect();
            if !self.header.is_match(&head) {
                continue;
            }

            // A boundary with no identifier stays traceable for manual
            // review via a page-indexed placeholder.
            let student_id = DISTRICT_ID
                .captures(&page.normalized)
                .map(|captures| captures[1].to_string())
                .unwrap_or_else(|| format!("unknown_{}", page.index));

            let date_raw = DOCUMENT_DATE
                .captures(&page.normalized)
                .map(|captures| captures[1].to_string())
                .unwrap_or_else(|| "unknown_date".to_string());

            let date_formatted = normalize_date(&date_raw);

            tracing::debug!(
                page = page.index + 1,
                student_id = %student_id,
                date = %date_raw,
                "Found document boundary"
            );
            boundaries.push(DocumentBoundary {
                start_page: page.index,
                student_id,
                date_raw,
                date_formatted,
            });
        }

        boundaries
    }

    /// Page range covered by each boundary: `[start, next_start)`, with the
    /// last boundary running to end of document.
    pub fn page_ranges(boundaries: &[DocumentBoundary], total_pages: usize) -> Vec<Range<usize>> {
        boundaries
            .iter()
            .enumerate()
            .map(|(i, boundary)| {
                let end = boundaries
                    .get(i + 1)
                    .map_or(total_pages, |next| next.start_page);
                boundary.start_page..end
            })
            .collect()
    }
}
