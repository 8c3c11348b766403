use super::category::{DocumentFamily, DocumentTypeLabel};

/// Reported type for packets containing more than one distinct document type.
pub const COMBINED_PACKAGE_LABEL: &str = "Complete Reclassification Package";

/// One logical output document assembled from one or more contiguous or
/// grouped source pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub student_id: String,
    /// Display name extracted from the pages, or "Unknown".
    pub student_name: String,
    /// Resolved document date (`YYYY-MM-DD`), or `unknown_date`.
    pub date: String,
    pub family: DocumentFamily,
    /// Distinct document types seen across the segment's pages.
    pub type_labels: Vec<DocumentTypeLabel>,
    /// Sorted 0-based page indices contributing to this segment.
    pub pages: Vec<usize>,
    /// Output artifact name.
    pub file_label: String,
    /// Assembled per-segment PDF payload.
    pub payload: Vec<u8>,
}

impl Segment {
    /// The reported document type: the single matched label, or the combined
    /// package label when several distinct types are present.
    pub fn document_type(&self) -> String {
        match self.family {
            DocumentFamily::IepAtAGlance => "IEP At A Glance".to_string(),
            _ => match self.type_labels.as_slice() {
                [single] => single.as_str().to_string(),
                _ => COMBINED_PACKAGE_LABEL.to_string(),
            },
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
