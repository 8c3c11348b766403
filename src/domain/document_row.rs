/// Storage limit for the display name column.
pub const MAX_DISPLAY_NAME_LEN: usize = 100;

/// The persisted archive unit. Rows are never mutated after insert except
/// for the `deleted` flag set by supersession, and never physically deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedDocumentRow {
    pub student_id: String,
    /// Per-student, per-table monotonically increasing sequence number.
    pub sequence: i32,
    /// Document date (`YYYY-MM-DD`), or a placeholder for unresolved dates.
    pub document_date: String,
    /// Grade recorded on the student roster at upload time.
    pub grade: String,
    pub category_code: String,
    pub display_name: String,
    pub extension: String,
    pub payload: Vec<u8>,
    pub size_bytes: i64,
    pub locked: bool,
    /// Lock-table tag identifying which subsystem owns the document.
    pub source_table: String,
    pub uploaded_by: String,
    /// Upload date (`YYYY-MM-DD`).
    pub upload_date: String,
    pub deleted: bool,
}

impl ArchivedDocumentRow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        student_id: String,
        sequence: i32,
        document_date: String,
        grade: String,
        category_code: String,
        display_name: &str,
        extension: String,
        payload: Vec<u8>,
        source_table: String,
        upload_date: String,
    ) -> Self {
        let size_bytes = payload.len() as i64;
        Self {
            student_id,
            sequence,
            document_date,
            grade,
            category_code,
            display_name: truncate_display_name(display_name),
            extension,
            payload,
            size_bytes,
            locked: true,
            source_table,
            uploaded_by: "Automation".to_string(),
            upload_date,
            deleted: false,
        }
    }
}

fn truncate_display_name(name: &str) -> String {
    name.chars().take(MAX_DISPLAY_NAME_LEN).collect()
}
