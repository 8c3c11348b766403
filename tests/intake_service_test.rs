use std::sync::Arc;

use doc_intake::application::services::IntakeService;
use doc_intake::config::IntakeSettings;
use doc_intake::domain::BatchStatus;
use doc_intake::infrastructure::pdf::MockPdfSplitter;
use doc_intake::infrastructure::persistence::InMemorySisClient;

fn header_page(student_id: &str, date: &str) -> String {
    format!(
        "MID ALAMEDA COUNTY SELPA   IEP AT A GLANCE\n\
         District ID: {student_id}\n\
         IEP Date: {date}\n\
         Eligibility: Speech or Language Impairment"
    )
}

fn service_with(
    sis: Arc<InMemorySisClient>,
    pages: &[String],
) -> IntakeService<InMemorySisClient, MockPdfSplitter> {
    let pdf = Arc::new(MockPdfSplitter::with_pages(pages.to_vec()));
    IntakeService::new(sis, pdf, &IntakeSettings::default()).unwrap()
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn given_pdf_without_headers_when_processing_iep_batch_then_warning_and_no_writes() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "05")]));
    let service = service_with(
        sis.clone(),
        &["Just an ordinary page.".to_string(), "Another page.".to_string()],
    );

    let result = service.process_iep_batch(b"%PDF", "scan.pdf", false).await;

    assert_eq!(result.status, BatchStatus::Warning);
    assert!(result.message.contains("No IEP documents found"));
    assert!(result.extracted_docs.is_empty());
    assert!(sis.rows().is_empty());
}

#[tokio::test]
async fn given_three_documents_when_processing_iep_batch_then_all_archived_with_page_partition() {
    let sis = Arc::new(InMemorySisClient::with_students(&[
        ("111111", "03"),
        ("222222", "07"),
        ("333333", "11"),
    ]));
    let pages = vec![
        header_page("111111", "1/2/2024"),
        "Goals continue here.".to_string(),
        "Services continue here.".to_string(),
        header_page("222222", "3/15/2024"),
        "Goals continue here.".to_string(),
        header_page("333333", "11/30/2023"),
    ];
    let service = service_with(sis.clone(), &pages);

    let result = service.process_iep_batch(b"%PDF", "batch.pdf", false).await;

    assert_eq!(result.status, BatchStatus::Success);
    assert_eq!(result.total_documents, 3);
    assert_eq!(result.extracted_docs.len(), 3);
    assert_eq!(result.message, "Successfully processed 3 of 3 IEP document(s)");

    let first = &result.extracted_docs[0];
    assert_eq!(first.stu_id, "111111");
    assert_eq!(first.document_type, "IEP At A Glance");
    assert_eq!(first.document_date, "2024-01-02");
    assert_eq!(first.file, "IEP_at_a_Glance_for_111111_2024-01-02.pdf");
    assert_eq!(first.pages, 3);

    let rows = sis.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].payload, b"pages:[0, 1, 2]");
    assert_eq!(rows[1].payload, b"pages:[3, 4]");
    assert_eq!(rows[2].payload, b"pages:[5]");
    assert_eq!(rows[0].display_name, "IEP At A Glance 01/02/2024 #111111");
    assert_eq!(rows[0].grade, "03");
    assert_eq!(rows[0].category_code, "11");
    assert_eq!(rows[0].source_table, "CSE");
    assert_eq!(rows[0].uploaded_by, "Automation");
    assert_eq!(rows[0].extension, "pdf");
    assert!(rows[0].locked);
    assert!(rows.iter().all(|row| row.sequence == 1 && !row.deleted));
}

#[tokio::test]
async fn given_existing_active_document_when_reprocessing_then_prior_row_is_superseded() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    let pages = vec![header_page("111111", "1/2/2024")];
    let service = service_with(sis.clone(), &pages);

    let first = service.process_iep_batch(b"%PDF", "batch.pdf", false).await;
    let second = service.process_iep_batch(b"%PDF", "batch.pdf", false).await;

    assert_eq!(first.status, BatchStatus::Success);
    assert_eq!(second.status, BatchStatus::Success);

    let rows = sis.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].deleted);
    assert!(!rows[1].deleted);
    assert_eq!(rows[0].sequence, 1);
    assert_eq!(rows[1].sequence, 2);

    let active = sis.active_rows("111111", "11");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].sequence, 2);
}

#[tokio::test]
async fn given_unknown_student_when_processing_then_partial_success_with_named_error() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    let pages = vec![
        header_page("111111", "1/2/2024"),
        header_page("999999", "1/2/2024"),
    ];
    let service = service_with(sis.clone(), &pages);

    let result = service.process_iep_batch(b"%PDF", "batch.pdf", false).await;

    assert_eq!(result.status, BatchStatus::PartialSuccess);
    assert_eq!(result.extracted_docs.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].stu_id, "999999");
    assert_eq!(
        result.errors[0].message,
        "Student 999999 not found in the database, or student is inactive."
    );
    assert_eq!(sis.rows().len(), 1);
}

#[tokio::test]
async fn given_test_run_when_processing_then_nothing_is_written() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    let pages = vec![header_page("111111", "1/2/2024")];
    let service = service_with(sis.clone(), &pages);

    let result = service.process_iep_batch(b"%PDF", "batch.pdf", true).await;

    assert_eq!(result.status, BatchStatus::Success);
    assert!(result
        .message
        .ends_with("(TEST RUN - not uploaded to database)"));
    assert_eq!(result.extracted_docs.len(), 1);
    assert!(sis.rows().is_empty());
}

#[tokio::test]
async fn given_non_pdf_filename_when_processing_then_batch_is_rejected() {
    let sis = Arc::new(InMemorySisClient::new());
    let service = service_with(sis.clone(), &["irrelevant".to_string()]);

    let result = service.process_iep_batch(b"data", "batch.docx", false).await;

    assert_eq!(result.status, BatchStatus::Error);
    assert_eq!(result.message, "Only PDF files are supported");
    assert!(sis.rows().is_empty());
}

#[tokio::test]
async fn given_failing_inserts_when_processing_then_batch_reports_error() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    sis.set_fail_inserts(true);
    let pages = vec![header_page("111111", "1/2/2024")];
    let service = service_with(sis.clone(), &pages);

    let result = service.process_iep_batch(b"%PDF", "batch.pdf", false).await;

    assert_eq!(result.status, BatchStatus::Error);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.starts_with("Error uploading document:"));
    assert!(sis.rows().is_empty());
}

#[tokio::test]
async fn given_multi_student_packet_when_processing_reclassification_then_one_document_per_student() {
    let sis = Arc::new(InMemorySisClient::with_students(&[
        ("123456", "05"),
        ("654321", "08"),
    ]));
    let pages = vec![
        "Notification of English Language Program Exit\nStudent ID: 123456\nStudent Name: Maria Lopez".to_string(),
        "Reclassification Meeting with Parent/Guardian\nStudent ID: 123456".to_string(),
        "Teacher Evaluation for Reclassification\nStudent ID: 654321\nStudent Name: Ana Chen".to_string(),
    ];
    let service = service_with(sis.clone(), &pages);

    let result = service
        .process_reclassification_batch(b"%PDF", "packet.pdf", false)
        .await;

    assert_eq!(result.status, BatchStatus::Success);
    assert_eq!(result.total_documents, 2);

    let first = &result.extracted_docs[0];
    assert_eq!(first.stu_id, "123456");
    assert_eq!(first.student_name, "Maria Lopez");
    assert_eq!(first.document_type, "Complete Reclassification Package");
    assert_eq!(
        first.file,
        "123456_Maria_Lopez_Complete_Reclassification_Package.pdf"
    );
    assert_eq!(first.pages, 2);

    let second = &result.extracted_docs[1];
    assert_eq!(second.stu_id, "654321");
    assert_eq!(second.document_type, "Teacher Evaluation for Reclassification");
    assert_eq!(second.file, "654321_Ana_Chen_Teacher_Evaluation.pdf");

    let rows = sis.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].payload, b"pages:[0, 1]");
    assert_eq!(rows[0].category_code, "12");
    assert_eq!(rows[0].source_table, "DOC");
    assert_eq!(
        rows[0].display_name,
        "123456_Maria_Lopez_Complete_Reclassification_Package"
    );
    assert_eq!(rows[0].document_date, today());
}

#[tokio::test]
async fn given_single_student_packet_when_processing_reclassification_then_filename_is_kept() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("123456", "05")]));
    let pages = vec![
        "Teacher Evaluation for Reclassification\nStudent ID: 123456".to_string(),
    ];
    let service = service_with(sis.clone(), &pages);

    let result = service
        .process_reclassification_batch(b"%PDF", "123456_Maria_Lopez_Evaluation.pdf", false)
        .await;

    assert_eq!(result.status, BatchStatus::Success);
    assert_eq!(result.extracted_docs[0].file, "123456_Maria_Lopez_Evaluation.pdf");
    assert_eq!(
        sis.rows()[0].display_name,
        "123456_Maria_Lopez_Evaluation"
    );
}

#[tokio::test]
async fn given_repeat_reclassification_when_processing_then_prior_package_is_superseded() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("123456", "05")]));
    let pages = vec![
        "Teacher Evaluation for Reclassification\nStudent ID: 123456".to_string(),
    ];
    let service = service_with(sis.clone(), &pages);

    service
        .process_reclassification_batch(b"%PDF", "packet.pdf", false)
        .await;
    service
        .process_reclassification_batch(b"%PDF", "packet.pdf", false)
        .await;

    assert_eq!(sis.rows().len(), 2);
    assert_eq!(sis.active_rows("123456", "12").len(), 1);
}

#[tokio::test]
async fn given_unreadable_packet_when_processing_reclassification_then_warning_is_returned() {
    let sis = Arc::new(InMemorySisClient::new());
    let pages = vec!["No identifiers on this page at all.".to_string()];
    let service = service_with(sis.clone(), &pages);

    let result = service
        .process_reclassification_batch(b"%PDF", "scan_output.pdf", false)
        .await;

    assert_eq!(result.status, BatchStatus::Warning);
    assert!(result.message.contains("No student documents found"));
}

#[tokio::test]
async fn given_general_uploads_when_processing_then_documents_accumulate() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    let service = service_with(sis.clone(), &["unused".to_string()]);

    let first = service
        .process_general_upload(b"report-bytes", "report.docx", "111111", "Progress Report", false)
        .await;
    let second = service
        .process_general_upload(b"photo-bytes", "photo.JPG", "111111", "ID Photo", false)
        .await;

    assert_eq!(first.status, BatchStatus::Success);
    assert_eq!(second.status, BatchStatus::Success);

    let rows = sis.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category_code, "99");
    assert_eq!(rows[0].display_name, "Progress Report");
    assert_eq!(rows[0].extension, "docx");
    assert_eq!(rows[0].payload, b"report-bytes");
    assert_eq!(rows[1].extension, "jpg");
    assert_eq!(rows[1].sequence, 2);
    assert_eq!(sis.active_rows("111111", "99").len(), 2);
}

#[tokio::test]
async fn given_unsupported_extension_when_uploading_general_document_then_error_is_returned() {
    let sis = Arc::new(InMemorySisClient::new());
    let service = service_with(sis.clone(), &["unused".to_string()]);

    let result = service
        .process_general_upload(b"data", "report.exe", "111111", "Report", false)
        .await;

    assert_eq!(result.status, BatchStatus::Error);
    assert!(result.message.contains("Unsupported file type"));
    assert!(sis.rows().is_empty());
}

#[tokio::test]
async fn given_long_display_name_when_uploading_then_name_is_truncated() {
    let sis = Arc::new(InMemorySisClient::with_students(&[("111111", "03")]));
    let service = service_with(sis.clone(), &["unused".to_string()]);
    let long_name = "N".repeat(150);

    let result = service
        .process_general_upload(b"data", "report.pdf", "111111", &long_name, false)
        .await;

    assert_eq!(result.status, BatchStatus::Success);
    assert_eq!(sis.rows()[0].display_name.chars().count(), 100);
}
