use std::fmt;

use async_trait::async_trait;

use crate::domain::ArchivedDocumentRow;

/// Tables carrying a per-student sequence column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTable {
    Documents,
}

impl SequenceTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceTable::Documents => "documents",
        }
    }
}

impl fmt::Display for SequenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Narrow interface to the Student Information System. The pipeline issues
/// parameterized calls only; it never builds SQL itself.
#[async_trait]
pub trait SisClient: Send + Sync {
    /// Highest existing sequence number for the student plus one, or 1 when
    /// the student has no rows. Read immediately before use.
    async fn next_sequence(&self, student_id: &str, table: SequenceTable)
        -> Result<i32, SisError>;

    /// Current grade for an active student, or `None` when the student is
    /// unknown or inactive.
    async fn student_grade(&self, student_id: &str) -> Result<Option<String>, SisError>;

    /// Soft-delete all active rows for the student and category. Returns the
    /// number of rows marked deleted.
    async fn soft_delete_active(
        &self,
        student_id: &str,
        category_code: &str,
    ) -> Result<u64, SisError>;

    /// Insert a new archived document row.
    async fn insert_document_row(&self, row: &ArchivedDocumentRow) -> Result<(), SisError>;

    /// Soft-delete active rows of the row's category and insert the new row
    /// within one transaction, so a failed insert cannot leave the student
    /// without an active document in that category.
    async fn supersede_and_insert(&self, row: &ArchivedDocumentRow) -> Result<(), SisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SisError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}
