/// Detected start of a new logical document within a multi-page source PDF.
///
/// One boundary is opened per matched header occurrence; it is closed at the
/// next boundary's start page or at end of document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBoundary {
    pub start_page: usize,
    /// Extracted student identifier, or a traceable `unknown_<page>`
    /// placeholder when no identifier pattern matched.
    pub student_id: String,
    /// Date as matched on the page, or `unknown_date`.
    pub date_raw: String,
    /// Date normalized to `YYYY-MM-DD` where parseable.
    pub date_formatted: String,
}
