use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Ordered identifier patterns, most specific phrasing first. The first
/// pattern to match a page wins; later patterns are not tried.
static STUDENT_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"District ID:\s*(\d{5,6})").unwrap(),
        Regex::new(r"Student ID[#:]?\s*(\d{5,6})").unwrap(),
        Regex::new(r"\bID[#:]\s*(\d{5,6})").unwrap(),
        Regex::new(r"\b(\d{6})\b").unwrap(),
    ]
});

/// Ordered display-name patterns. Candidates are validated before being
/// accepted; an invalid candidate falls through to the next pattern.
static STUDENT_NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"Student Name:\s*([A-Za-z][A-Za-z ,.'-]+)").unwrap(),
        Regex::new(r"Name of Student:\s*([A-Za-z][A-Za-z ,.'-]+)").unwrap(),
        Regex::new(r"Student:\s*([A-Za-z][A-Za-z ,.'-]+)").unwrap(),
    ]
});

static FILENAME_ID_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{5,6})_").unwrap());
static FILENAME_ID_ANY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{5,6})").unwrap());

/// First-match-wins identifier extraction from page text.
pub fn extract_student_id(text: &str) -> Option<String> {
    STUDENT_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|captures| captures[1].to_string())
}

/// Identifier fallback extraction from an upload filename, format
/// `XXXXXX_Name_Document.pdf`: a leading 5-6 digit prefix wins, otherwise
/// any 5-6 digit run in the stem.
pub fn extract_student_id_from_filename(filename: &str) -> Option<String> {
    let stem = filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem);

    FILENAME_ID_PREFIX
        .captures(stem)
        .or_else(|| FILENAME_ID_ANY.captures(stem))
        .map(|captures| captures[1].to_string())
}

/// First validated display-name candidate from page text.
pub fn extract_student_name(text: &str) -> Option<String> {
    for pattern in STUDENT_NAME_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            let candidate = captures[1].trim().to_string();
            if is_plausible_name(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Display-name validation: 3-50 characters, no digits, and at least two
/// whitespace-separated alphabetic tokens.
pub fn is_plausible_name(candidate: &str) -> bool {
    let len = candidate.chars().count();
    if !(3..=50).contains(&len) {
        return false;
    }
    if candidate.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let alphabetic_tokens = candidate
        .split_whitespace()
        .filter(|token| {
            token
                .chars()
                .all(|c| c.is_alphabetic() || matches!(c, '.' | ',' | '\'' | '-'))
        })
        .count();

    alphabetic_tokens >= 2
}

/// Normalize a `M/D/YYYY` date to `YYYY-MM-DD`. Unparsable input falls back
/// to slash-to-hyphen substitution; this never fails.
pub fn normalize_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.replace('/', "-"),
    }
}

/// Format an ISO date back to `MM/DD/YYYY` for display names. Placeholders
/// and unparsable values pass through unchanged.
pub fn format_date_us(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}
