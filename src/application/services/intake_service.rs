use std::sync::Arc;

use chrono::Local;

use crate::application::ports::{PdfSplitter, SequenceTable, SisClient};
use crate::config::IntakeSettings;
use crate::domain::{
    ArchivedDocumentRow, BatchResult, BatchStatus, CategoryTaxonomy, DocumentFamily, DocumentInfo,
    Segment, SegmentState, UploadError,
};

use super::boundary_detector::BoundaryDetector;
use super::metadata::format_date_us;
use super::packet_grouper::{GroupedPacket, PacketGrouper};

const GENERAL_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Drives a batch from raw PDF bytes to archived rows. Segments are
/// processed sequentially and independently; a failed segment is recorded
/// and never aborts the rest of the batch.
pub struct IntakeService<S, P>
where
    S: SisClient,
    P: PdfSplitter,
{
    sis: Arc<S>,
    pdf: Arc<P>,
    detector: BoundaryDetector,
    taxonomy: CategoryTaxonomy,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid header pattern: {0}")]
    InvalidHeaderPattern(#[from] regex::Error),
}

impl<S, P> IntakeService<S, P>
where
    S: SisClient,
    P: PdfSplitter,
{
    pub fn new(sis: Arc<S>, pdf: Arc<P>, settings: &IntakeSettings) -> Result<Self, IntakeError> {
        Ok(Self {
            sis,
            pdf,
            detector: BoundaryDetector::new(&settings.iep_header_pattern)?,
            taxonomy: settings.taxonomy.clone(),
        })
    }

    /// Process a multi-document IEP-at-a-Glance batch: split on the fixed
    /// header, archive one document per boundary, superseding prior active
    /// IEP documents per student.
    #[tracing::instrument(skip(self, data), fields(filename = %filename, bytes = data.len()))]
    pub async fn process_iep_batch(
        &self,
        data: &[u8],
        filename: &str,
        test_run: bool,
    ) -> BatchResult {
        if !is_pdf_filename(filename) {
            return BatchResult::error("Only PDF files are supported");
        }

        let pages = match self.pdf.extract_pages(data).await {
            Ok(pages) => pages,
            Err(e) => return BatchResult::error(format!("Error processing IEP documents: {e}")),
        };

        let boundaries = self.detector.detect(&pages);
        if boundaries.is_empty() {
            return BatchResult::warning(
                "No IEP documents found in the uploaded PDF. Please ensure the PDF contains \
                 valid IEP 'At a Glance' documents with the expected header format.",
            );
        }

        let ranges = BoundaryDetector::page_ranges(&boundaries, pages.len());
        let today = today();
        let total = boundaries.len();
        let mut extracted = Vec::new();
        let mut errors = Vec::new();

        for (boundary, range) in boundaries.iter().zip(&ranges) {
            let page_indices: Vec<usize> = range.clone().collect();
            let payload = match self.pdf.assemble(data, &page_indices).await {
                Ok(payload) => payload,
                Err(e) => {
                    errors.push(UploadError {
                        message: format!("Error assembling document: {e}"),
                        stu_id: boundary.student_id.clone(),
                        student_name: "Unknown".to_string(),
                    });
                    continue;
                }
            };

            let segment = Segment {
                student_id: boundary.student_id.clone(),
                student_name: "Unknown".to_string(),
                date: boundary.date_formatted.clone(),
                family: DocumentFamily::IepAtAGlance,
                type_labels: Vec::new(),
                pages: page_indices,
                file_label: format!(
                    "IEP_at_a_Glance_for_{}_{}.pdf",
                    boundary.student_id, boundary.date_formatted
                ),
                payload,
            };
            let display_name = format!(
                "IEP At A Glance {} #{}",
                format_date_us(&segment.date),
                segment.student_id
            );

            match self
                .upload_segment(&segment, &display_name, "pdf", "CSE", &today, test_run)
                .await
            {
                Ok(()) => extracted.push(document_info(&segment, &today)),
                Err(message) => {
                    tracing::warn!(
                        student_id = %segment.student_id,
                        state = %SegmentState::Failed,
                        message = %message,
                        "Segment failed"
                    );
                    errors.push(UploadError {
                        message,
                        stu_id: segment.student_id.clone(),
                        student_name: segment.student_name.clone(),
                    });
                }
            }
        }

        finish_batch("IEP document(s)", total, extracted, errors, test_run)
    }

    /// Process a reclassification packet: group pages by student identifier
    /// across document types, archive one combined document per student,
    /// superseding prior active reclassification documents.
    #[tracing::instrument(skip(self, data), fields(filename = %filename, bytes = data.len()))]
    pub async fn process_reclassification_batch(
        &self,
        data: &[u8],
        filename: &str,
        test_run: bool,
    ) -> BatchResult {
        if !is_pdf_filename(filename) {
            return BatchResult::error("Only PDF files are supported");
        }

        let pages = match self.pdf.extract_pages(data).await {
            Ok(pages) => pages,
            Err(e) => {
                return BatchResult::error(format!(
                    "Error processing reclassification documents: {e}"
                ))
            }
        };

        let packets = PacketGrouper::group(&pages, filename);
        if packets.is_empty() {
            return BatchResult::warning(
                "No student documents found in the uploaded PDF. Please ensure pages contain \
                 a readable student identifier.",
            );
        }

        let single_packet = packets.len() == 1;
        let today = today();
        let total = packets.len();
        let mut extracted = Vec::new();
        let mut errors = Vec::new();

        for packet in &packets {
            let student_name = packet
                .student_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string());

            let payload = match self.pdf.assemble(data, &packet.pages).await {
                Ok(payload) => payload,
                Err(e) => {
                    errors.push(UploadError {
                        message: format!("Error assembling document: {e}"),
                        stu_id: packet.student_id.clone(),
                        student_name,
                    });
                    continue;
                }
            };

            let file_label = if single_packet {
                filename.to_string()
            } else {
                packet_file_label(packet)
            };
            let display_name = file_stem(&file_label).to_string();

            let segment = Segment {
                student_id: packet.student_id.clone(),
                student_name,
                date: today.clone(),
                family: DocumentFamily::Reclassification,
                type_labels: packet.type_labels.clone(),
                pages: packet.pages.clone(),
                file_label,
                payload,
            };

            match self
                .upload_segment(&segment, &display_name, "pdf", "DOC", &today, test_run)
                .await
            {
                Ok(()) => extracted.push(document_info(&segment, &today)),
                Err(message) => {
                    tracing::warn!(
                        student_id = %segment.student_id,
                        state = %SegmentState::Failed,
                        message = %message,
                        "Segment failed"
                    );
                    errors.push(UploadError {
                        message,
                        stu_id: segment.student_id.clone(),
                        student_name: segment.student_name.clone(),
                    });
                }
            }
        }

        finish_batch("student document(s)", total, extracted, errors, test_run)
    }

    /// Archive a single caller-named document for one student. General
    /// documents accumulate; no supersession is applied.
    #[tracing::instrument(skip(self, data), fields(filename = %filename, student_id = %student_id))]
    pub async fn process_general_upload(
        &self,
        data: &[u8],
        filename: &str,
        student_id: &str,
        document_name: &str,
        test_run: bool,
    ) -> BatchResult {
        let Some(extension) = general_extension(filename) else {
            return BatchResult::error(
                "Unsupported file type. Supported: PDF, DOC, DOCX, JPG, JPEG, PNG",
            );
        };

        let today = today();
        let segment = Segment {
            student_id: student_id.to_string(),
            student_name: "Unknown".to_string(),
            date: today.clone(),
            family: DocumentFamily::General,
            type_labels: Vec::new(),
            pages: Vec::new(),
            file_label: filename.to_string(),
            payload: data.to_vec(),
        };

        match self
            .upload_segment(&segment, document_name, &extension, "DOC", &today, test_run)
            .await
        {
            Ok(()) => {
                let mut message = format!("Successfully uploaded {filename}");
                if test_run {
                    message.push_str(" (TEST RUN - not uploaded to database)");
                }
                BatchResult {
                    status: BatchStatus::Success,
                    message,
                    total_documents: 1,
                    extracted_docs: vec![DocumentInfo {
                        file: filename.to_string(),
                        stu_id: student_id.to_string(),
                        student_name: "Unknown".to_string(),
                        document_type: document_name.to_string(),
                        document_date: today.clone(),
                        pages: 1,
                        upload_date: today,
                    }],
                    errors: Vec::new(),
                }
            }
            Err(message) => BatchResult {
                status: BatchStatus::Error,
                message: "Failed to upload document".to_string(),
                total_documents: 0,
                extracted_docs: Vec::new(),
                errors: vec![UploadError {
                    message,
                    stu_id: student_id.to_string(),
                    student_name: "Unknown".to_string(),
                }],
            },
        }
    }

    /// Per-segment upload: resolve the student, allocate the next sequence,
    /// then persist - superseding prior active documents of the category for
    /// superseding families. Returns the failure message on error; the
    /// caller records it without aborting the batch.
    async fn upload_segment(
        &self,
        segment: &Segment,
        display_name: &str,
        extension: &str,
        source_table: &str,
        today: &str,
        test_run: bool,
    ) -> Result<(), String> {
        tracing::debug!(
            student_id = %segment.student_id,
            state = %SegmentState::Classified,
            document_type = %segment.document_type(),
            "Processing segment"
        );

        let grade = self
            .sis
            .student_grade(&segment.student_id)
            .await
            .map_err(|e| format!("Error uploading document: {e}"))?
            .ok_or_else(|| {
                format!(
                    "Student {} not found in the database, or student is inactive.",
                    segment.student_id
                )
            })?;
        tracing::debug!(
            student_id = %segment.student_id,
            state = %SegmentState::StudentResolved,
            grade = %grade,
            "Resolved student"
        );

        let sequence = self
            .sis
            .next_sequence(&segment.student_id, SequenceTable::Documents)
            .await
            .map_err(|e| format!("Error uploading document: {e}"))?;
        tracing::debug!(
            student_id = %segment.student_id,
            state = %SegmentState::Sequenced,
            sequence,
            "Allocated sequence"
        );

        let row = ArchivedDocumentRow::new(
            segment.student_id.clone(),
            sequence,
            segment.date.clone(),
            grade,
            self.taxonomy.code_for(segment.family).to_string(),
            display_name,
            extension.to_string(),
            segment.payload.clone(),
            source_table.to_string(),
            today.to_string(),
        );

        if test_run {
            tracing::info!(
                student_id = %segment.student_id,
                sequence,
                "Test run - skipping database write"
            );
            return Ok(());
        }

        if segment.family.supersedes() {
            self.sis
                .supersede_and_insert(&row)
                .await
                .map_err(|e| format!("Error uploading document: {e}"))?;
            tracing::debug!(
                student_id = %segment.student_id,
                state = %SegmentState::Superseded,
                category_code = %row.category_code,
                "Superseded prior active documents"
            );
        } else {
            self.sis
                .insert_document_row(&row)
                .await
                .map_err(|e| format!("Error uploading document: {e}"))?;
        }

        tracing::info!(
            student_id = %segment.student_id,
            sequence,
            state = %SegmentState::Persisted,
            file = %segment.file_label,
            "Archived document"
        );
        Ok(())
    }
}

fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

fn general_extension(filename: &str) -> Option<String> {
    let (_, extension) = filename.rsplit_once('.')?;
    let extension = extension.to_lowercase();
    GENERAL_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

fn file_stem(file_label: &str) -> &str {
    file_label
        .rsplit_once('.')
        .map_or(file_label, |(stem, _)| stem)
}

fn packet_file_label(packet: &GroupedPacket) -> String {
    let name = packet
        .student_name
        .as_deref()
        .unwrap_or("Unknown")
        .replace(' ', "_");
    let type_token = match packet.type_labels.as_slice() {
        [single] => single.file_token(),
        _ => "Complete_Reclassification_Package",
    };
    format!("{}_{}_{}.pdf", packet.student_id, name, type_token)
}

fn document_info(segment: &Segment, today: &str) -> DocumentInfo {
    DocumentInfo {
        file: segment.file_label.clone(),
        stu_id: segment.student_id.clone(),
        student_name: segment.student_name.clone(),
        document_type: segment.document_type(),
        document_date: segment.date.clone(),
        pages: segment.page_count(),
        upload_date: today.to_string(),
    }
}

fn finish_batch(
    kind: &str,
    total: usize,
    extracted: Vec<DocumentInfo>,
    errors: Vec<UploadError>,
    test_run: bool,
) -> BatchResult {
    let status = if errors.is_empty() {
        BatchStatus::Success
    } else if extracted.is_empty() {
        BatchStatus::Error
    } else {
        BatchStatus::PartialSuccess
    };

    let mut message = format!("Successfully processed {} of {} {}", extracted.len(), total, kind);
    if test_run {
        message.push_str(" (TEST RUN - not uploaded to database)");
    }

    BatchResult {
        status,
        message,
        total_documents: total,
        extracted_docs: extracted,
        errors,
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
