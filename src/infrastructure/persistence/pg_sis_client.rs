use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use tracing::instrument;

use crate::application::ports::{SequenceTable, SisClient, SisError};
use crate::domain::ArchivedDocumentRow;

const INSERT_DOCUMENT: &str = r#"
    INSERT INTO documents (
        student_id, sequence, document_date, grade, category_code,
        display_name, extension, payload, size_bytes, locked,
        source_table, uploaded_by, upload_date, deleted
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
"#;

const SOFT_DELETE_ACTIVE: &str = r#"
    UPDATE documents
    SET deleted = TRUE
    WHERE student_id = $1 AND category_code = $2 AND deleted = FALSE
"#;

/// Postgres-backed Student Information System client. All values are bound
/// parameters; table names come from the closed `SequenceTable` enum.
pub struct PgSisClient {
    pool: PgPool,
}

impl PgSisClient {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn insert_query(row: &ArchivedDocumentRow) -> Query<'_, Postgres, PgArguments> {
        sqlx::query(INSERT_DOCUMENT)
            .bind(&row.student_id)
            .bind(row.sequence)
            .bind(&row.document_date)
            .bind(&row.grade)
            .bind(&row.category_code)
            .bind(&row.display_name)
            .bind(&row.extension)
            .bind(&row.payload)
            .bind(row.size_bytes)
            .bind(row.locked)
            .bind(&row.source_table)
            .bind(&row.uploaded_by)
            .bind(&row.upload_date)
            .bind(row.deleted)
    }
}

#[async_trait]
impl SisClient for PgSisClient {
    #[instrument(skip(self), fields(student_id = %student_id, table = %table))]
    async fn next_sequence(
        &self,
        student_id: &str,
        table: SequenceTable,
    ) -> Result<i32, SisError> {
        let sql = format!(
            "SELECT sequence FROM {} WHERE student_id = $1 ORDER BY sequence DESC LIMIT 1",
            table.as_str()
        );

        let last: Option<i32> = sqlx::query_scalar(&sql)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        Ok(last.map_or(1, |sequence| sequence + 1))
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    async fn student_grade(&self, student_id: &str) -> Result<Option<String>, SisError> {
        let grade: Option<String> =
            sqlx::query_scalar("SELECT grade FROM students WHERE student_id = $1 AND active = TRUE")
                .bind(student_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        Ok(grade)
    }

    #[instrument(skip(self), fields(student_id = %student_id, category_code = %category_code))]
    async fn soft_delete_active(
        &self,
        student_id: &str,
        category_code: &str,
    ) -> Result<u64, SisError> {
        let result = sqlx::query(SOFT_DELETE_ACTIVE)
            .bind(student_id)
            .bind(category_code)
            .execute(&self.pool)
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, row), fields(student_id = %row.student_id, sequence = row.sequence))]
    async fn insert_document_row(&self, row: &ArchivedDocumentRow) -> Result<(), SisError> {
        Self::insert_query(row)
            .execute(&self.pool)
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(
        skip(self, row),
        fields(student_id = %row.student_id, sequence = row.sequence, category_code = %row.category_code)
    )]
    async fn supersede_and_insert(&self, row: &ArchivedDocumentRow) -> Result<(), SisError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SisError::ConnectionFailed(e.to_string()))?;

        let superseded = sqlx::query(SOFT_DELETE_ACTIVE)
            .bind(&row.student_id)
            .bind(&row.category_code)
            .execute(&mut *tx)
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?
            .rows_affected();

        Self::insert_query(row)
            .execute(&mut *tx)
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| SisError::QueryFailed(e.to_string()))?;

        tracing::debug!(superseded, "Superseded and inserted in one transaction");
        Ok(())
    }
}
