use doc_intake::application::services::{format_date_us, normalize_date, BoundaryDetector};
use doc_intake::domain::PageText;
use doc_intake::infrastructure::text_processing::normalize_extracted_text;

const HEADER_PATTERN: &str = r"MID ALAMEDA COUNTY SELPA\s+IEP AT A GLANCE";

fn pages_from(raw_pages: &[&str]) -> Vec<PageText> {
    raw_pages
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            PageText::new(index, raw.to_string(), normalize_extracted_text(raw))
        })
        .collect()
}

fn header_page(student_id: &str, date: &str) -> String {
    format!(
        "MID ALAMEDA COUNTY SELPA   IEP AT A GLANCE\n\
         District ID: {student_id}\n\
         IEP Date: {date}\n\
         Eligibility: Speech or Language Impairment"
    )
}

#[test]
fn given_headers_on_three_pages_when_detecting_then_three_boundaries_are_found() {
    let detector = BoundaryDetector::new(HEADER_PATTERN).unwrap();
    let pages = pages_from(&[
        &header_page("111111", "1/2/2024"),
        "Goals and accommodations continue here.",
        "Services table continues here.",
        "Signatures page.",
        &header_page("222222", "3/15/2024"),
        "Goals continue here.",
        "Services continue here.",
        &header_page("333333", "11/30/2023"),
        "Goals continue here.",
        "Signatures page.",
    ]);

    let boundaries = detector.detect(&pages);

    assert_eq!(boundaries.len(), 3);
    assert_eq!(boundaries[0].start_page, 0);
    assert_eq!(boundaries[0].student_id, "111111");
    assert_eq!(boundaries[0].date_raw, "1/2/2024");
    assert_eq!(boundaries[0].date_formatted, "2024-01-02");
    assert_eq!(boundaries[1].start_page, 4);
    assert_eq!(boundaries[1].student_id, "222222");
    assert_eq!(boundaries[2].start_page, 7);
    assert_eq!(boundaries[2].date_formatted, "2023-11-30");
}

#[test]
fn given_three_boundaries_when_computing_ranges_then_pages_are_partitioned() {
    let detector = BoundaryDetector::new(HEADER_PATTERN).unwrap();
    let pages = pages_from(&[
        &header_page("111111", "1/2/2024"),
        "filler",
        "filler",
        "filler",
        &header_page("222222", "3/15/2024"),
        "filler",
        "filler",
        &header_page("333333", "11/30/2023"),
        "filler",
        "filler",
    ]);

    let boundaries = detector.detect(&pages);
    let ranges = BoundaryDetector::page_ranges(&boundaries, pages.len());

    assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
}

#[test]
fn given_header_without_identifiers_when_detecting_then_placeholders_are_assigned() {
    let detector = BoundaryDetector::new(HEADER_PATTERN).unwrap();
    let pages = pages_from(&[
        "Cover letter.",
        "MID ALAMEDA COUNTY SELPA IEP AT A GLANCE\nNo identifying fields on this page.",
    ]);

    let boundaries = detector.detect(&pages);

    assert_eq!(boundaries.len(), 1);
    assert_eq!(boundaries[0].start_page, 1);
    assert_eq!(boundaries[0].student_id, "unknown_1");
    assert_eq!(boundaries[0].date_raw, "unknown_date");
    assert_eq!(boundaries[0].date_formatted, "unknown_date");
}

#[test]
fn given_header_past_page_top_when_detecting_then_page_is_not_a_boundary() {
    let detector = BoundaryDetector::new(HEADER_PATTERN).unwrap();
    let body = "x".repeat(600);
    let buried = format!("{body}\nMID ALAMEDA COUNTY SELPA IEP AT A GLANCE");
    let pages = pages_from(&[buried.as_str()]);

    let boundaries = detector.detect(&pages);

    assert!(boundaries.is_empty());
}

#[test]
fn given_us_date_when_normalized_then_iso_format_is_returned() {
    assert_eq!(normalize_date("3/5/2024"), "2024-03-05");
    assert_eq!(normalize_date("11/30/2023"), "2023-11-30");
}

#[test]
fn given_unparsable_date_when_normalized_then_slashes_become_hyphens() {
    assert_eq!(normalize_date("13/45/2024"), "13-45-2024");
    assert_eq!(normalize_date("unknown_date"), "unknown_date");
}

#[test]
fn given_iso_date_when_formatted_for_display_then_us_format_is_returned() {
    assert_eq!(format_date_us("2024-03-05"), "03/05/2024");
    assert_eq!(format_date_us("unknown_date"), "unknown_date");
}
