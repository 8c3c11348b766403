use std::fmt;

/// Archival document family. The family determines the stored category code
/// and whether uploads supersede prior active documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFamily {
    IepAtAGlance,
    Reclassification,
    General,
}

impl DocumentFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFamily::IepAtAGlance => "IEP",
            DocumentFamily::Reclassification => "RECLASS",
            DocumentFamily::General => "GENERAL",
        }
    }

    /// Whether a successful upload soft-deletes prior active documents of
    /// the same category. General documents accumulate instead.
    pub fn supersedes(&self) -> bool {
        !matches!(self, DocumentFamily::General)
    }
}

impl fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Family → category code mapping, sourced from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTaxonomy {
    pub iep_at_a_glance: String,
    pub reclassification: String,
    pub general: String,
}

impl CategoryTaxonomy {
    pub fn code_for(&self, family: DocumentFamily) -> &str {
        match family {
            DocumentFamily::IepAtAGlance => &self.iep_at_a_glance,
            DocumentFamily::Reclassification => &self.reclassification,
            DocumentFamily::General => &self.general,
        }
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self {
            iep_at_a_glance: "11".to_string(),
            reclassification: "12".to_string(),
            general: "99".to_string(),
        }
    }
}

/// Specific document type detected within a reclassification packet.
/// Informational metadata only; storage uses the family's category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentTypeLabel {
    ProgramExitNotice,
    ParentMeeting,
    TeacherEvaluation,
}

impl DocumentTypeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentTypeLabel::ProgramExitNotice => {
                "Notification of English Language Program Exit"
            }
            DocumentTypeLabel::ParentMeeting => "Reclassification Meeting with Parent/Guardian",
            DocumentTypeLabel::TeacherEvaluation => "Teacher Evaluation for Reclassification",
        }
    }

    /// Filename-safe form of the label.
    pub fn file_token(&self) -> &'static str {
        match self {
            DocumentTypeLabel::ProgramExitNotice => "Program_Exit_Notification",
            DocumentTypeLabel::ParentMeeting => "Reclassification_Meeting",
            DocumentTypeLabel::TeacherEvaluation => "Teacher_Evaluation",
        }
    }
}

impl fmt::Display for DocumentTypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
