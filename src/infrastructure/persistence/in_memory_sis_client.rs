use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{SequenceTable, SisClient, SisError};
use crate::domain::ArchivedDocumentRow;

#[derive(Default)]
struct State {
    students: HashMap<String, String>,
    rows: Vec<ArchivedDocumentRow>,
    fail_inserts: bool,
}

/// In-memory Student Information System for tests: a roster of
/// student → grade plus an append-only document table with soft deletes.
#[derive(Default)]
pub struct InMemorySisClient {
    state: Mutex<State>,
}

impl InMemorySisClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(students: &[(&str, &str)]) -> Self {
        let client = Self::new();
        for (student_id, grade) in students {
            client.add_student(student_id, grade);
        }
        client
    }

    pub fn add_student(&self, student_id: &str, grade: &str) {
        self.lock()
            .students
            .insert(student_id.to_string(), grade.to_string());
    }

    /// Make subsequent inserts fail, to exercise per-segment failure paths.
    pub fn set_fail_inserts(&self, fail: bool) {
        self.lock().fail_inserts = fail;
    }

    pub fn rows(&self) -> Vec<ArchivedDocumentRow> {
        self.lock().rows.clone()
    }

    pub fn active_rows(&self, student_id: &str, category_code: &str) -> Vec<ArchivedDocumentRow> {
        self.lock()
            .rows
            .iter()
            .filter(|row| {
                !row.deleted && row.student_id == student_id && row.category_code == category_code
            })
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SisClient for InMemorySisClient {
    async fn next_sequence(
        &self,
        student_id: &str,
        _table: SequenceTable,
    ) -> Result<i32, SisError> {
        let state = self.lock();
        let last = state
            .rows
            .iter()
            .filter(|row| row.student_id == student_id)
            .map(|row| row.sequence)
            .max();
        Ok(last.map_or(1, |sequence| sequence + 1))
    }

    async fn student_grade(&self, student_id: &str) -> Result<Option<String>, SisError> {
        Ok(self.lock().students.get(student_id).cloned())
    }

    async fn soft_delete_active(
        &self,
        student_id: &str,
        category_code: &str,
    ) -> Result<u64, SisError> {
        let mut state = self.lock();
        let mut affected = 0;
        for row in state.rows.iter_mut() {
            if !row.deleted && row.student_id == student_id && row.category_code == category_code {
                row.deleted = true;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn insert_document_row(&self, row: &ArchivedDocumentRow) -> Result<(), SisError> {
        let mut state = self.lock();
        if state.fail_inserts {
            return Err(SisError::QueryFailed("simulated insert failure".to_string()));
        }
        state.rows.push(row.clone());
        Ok(())
    }

    async fn supersede_and_insert(&self, row: &ArchivedDocumentRow) -> Result<(), SisError> {
        let mut state = self.lock();
        // Transactional: a failing insert leaves prior rows untouched.
        if state.fail_inserts {
            return Err(SisError::QueryFailed("simulated insert failure".to_string()));
        }
        for existing in state.rows.iter_mut() {
            if !existing.deleted
                && existing.student_id == row.student_id
                && existing.category_code == row.category_code
            {
                existing.deleted = true;
            }
        }
        state.rows.push(row.clone());
        Ok(())
    }
}
