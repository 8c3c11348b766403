use regex::Regex;
use std::sync::LazyLock;

use crate::domain::DocumentTypeLabel;

/// Ordered phrase → label rules, evaluated first-match-wins. Phrases match
/// the known fixed headers verbatim, with flexible whitespace to absorb
/// extraction artifacts.
static TYPE_RULES: LazyLock<Vec<(Regex, DocumentTypeLabel)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"Notification\s+of\s+English\s+Language\s+Program\s+Exit").unwrap(),
            DocumentTypeLabel::ProgramExitNotice,
        ),
        (
            Regex::new(r"Reclassification\s+Meeting\s+with\s+Parent/Guardian").unwrap(),
            DocumentTypeLabel::ParentMeeting,
        ),
        (
            Regex::new(r"Teacher\s+Evaluation\s+for\s+Reclassification").unwrap(),
            DocumentTypeLabel::TeacherEvaluation,
        ),
    ]
});

/// Classify a page by the first known phrase it contains, if any.
pub fn classify_page_type(text: &str) -> Option<DocumentTypeLabel> {
    TYPE_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, label)| *label)
}
