use serde::Serialize;

/// Overall outcome of a batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Success,
    PartialSuccess,
    Warning,
    Error,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Success => "SUCCESS",
            BatchStatus::PartialSuccess => "PARTIAL_SUCCESS",
            BatchStatus::Warning => "WARNING",
            BatchStatus::Error => "ERROR",
        }
    }
}

/// Descriptor for a successfully processed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentInfo {
    pub file: String,
    pub stu_id: String,
    pub student_name: String,
    pub document_type: String,
    pub document_date: String,
    pub pages: usize,
    pub upload_date: String,
}

/// Structured per-segment failure, surfaced in the batch result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadError {
    pub message: String,
    pub stu_id: String,
    pub student_name: String,
}

/// Aggregate result of one intake batch. Built per request and discarded;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub status: BatchStatus,
    pub message: String,
    pub total_documents: usize,
    pub extracted_docs: Vec<DocumentInfo>,
    pub errors: Vec<UploadError>,
}

impl BatchResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Error,
            message: message.into(),
            total_documents: 0,
            extracted_docs: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Warning,
            message: message.into(),
            total_documents: 0,
            extracted_docs: Vec::new(),
            errors: Vec::new(),
        }
    }
}
