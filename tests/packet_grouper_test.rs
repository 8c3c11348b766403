use doc_intake::application::services::{
    extract_student_id_from_filename, is_plausible_name, PacketGrouper,
};
use doc_intake::domain::{DocumentTypeLabel, PageText};
use doc_intake::infrastructure::text_processing::normalize_extracted_text;

fn pages_from(raw_pages: &[&str]) -> Vec<PageText> {
    raw_pages
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            PageText::new(index, raw.to_string(), normalize_extracted_text(raw))
        })
        .collect()
}

#[test]
fn given_interleaved_students_when_grouping_then_packets_accumulate_by_identifier() {
    let pages = pages_from(&[
        "Notification of English Language Program Exit\nStudent ID: 123456\nStudent Name: Maria Lopez",
        "Reclassification Meeting with Parent/Guardian\nStudent ID: 654321\nStudent Name: Ana Chen",
        "Teacher Evaluation for Reclassification\nStudent ID: 123456",
        "Reclassification Meeting with Parent/Guardian\nStudent ID: 123456",
    ]);

    let packets = PacketGrouper::group(&pages, "upload.pdf");

    assert_eq!(packets.len(), 2);

    let first = &packets[0];
    assert_eq!(first.student_id, "123456");
    assert_eq!(first.student_name.as_deref(), Some("Maria Lopez"));
    assert_eq!(first.pages, vec![0, 2, 3]);
    assert_eq!(
        first.type_labels,
        vec![
            DocumentTypeLabel::ProgramExitNotice,
            DocumentTypeLabel::TeacherEvaluation,
            DocumentTypeLabel::ParentMeeting,
        ]
    );

    let second = &packets[1];
    assert_eq!(second.student_id, "654321");
    assert_eq!(second.student_name.as_deref(), Some("Ana Chen"));
    assert_eq!(second.pages, vec![1]);
    assert_eq!(second.type_labels, vec![DocumentTypeLabel::ParentMeeting]);
}

#[test]
fn given_page_without_identifier_when_grouping_then_filename_hint_applies() {
    let pages = pages_from(&[
        "Teacher Evaluation for Reclassification\nNo identifier printed on this page.",
    ]);

    let packets = PacketGrouper::group(&pages, "123456_Maria_Lopez_Teacher_Evaluation.pdf");

    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].student_id, "123456");
    assert_eq!(packets[0].pages, vec![0]);
}

#[test]
fn given_no_identifier_anywhere_when_grouping_then_page_is_skipped() {
    let pages = pages_from(&[
        "Teacher Evaluation for Reclassification\nNo identifier printed on this page.",
        "Student ID: 654321\nReclassification Meeting with Parent/Guardian",
    ]);

    let packets = PacketGrouper::group(&pages, "scan_output.pdf");

    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].student_id, "654321");
    assert_eq!(packets[0].pages, vec![1]);
}

#[test]
fn given_repeated_types_when_grouping_then_labels_are_deduplicated() {
    let pages = pages_from(&[
        "Teacher Evaluation for Reclassification\nStudent ID: 123456",
        "Teacher Evaluation for Reclassification (continued)\nStudent ID: 123456",
    ]);

    let packets = PacketGrouper::group(&pages, "upload.pdf");

    assert_eq!(packets.len(), 1);
    assert_eq!(
        packets[0].type_labels,
        vec![DocumentTypeLabel::TeacherEvaluation]
    );
}

#[test]
fn given_filename_with_leading_id_then_prefix_wins_over_other_digits() {
    assert_eq!(
        extract_student_id_from_filename("123456_Report_2024.pdf"),
        Some("123456".to_string())
    );
    assert_eq!(
        extract_student_id_from_filename("Report_654321_final.pdf"),
        Some("654321".to_string())
    );
    assert_eq!(extract_student_id_from_filename("scan_output.pdf"), None);
}

#[test]
fn given_name_candidates_then_only_plausible_names_are_accepted() {
    assert!(is_plausible_name("Maria Lopez"));
    assert!(is_plausible_name("O'Brien, James Jr."));
    assert!(!is_plausible_name("Room 204"));
    assert!(!is_plausible_name("Al"));
    assert!(!is_plausible_name("Maria"));
}
