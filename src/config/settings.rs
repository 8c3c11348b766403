use crate::domain::CategoryTaxonomy;

/// Header phrase opening every IEP-at-a-Glance document.
const DEFAULT_IEP_HEADER: &str = r"MID ALAMEDA COUNTY SELPA\s+IEP AT A GLANCE";

/// Configuration consumed by the intake pipeline. Injected by value into
/// each component at construction; nothing reads ambient globals.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSettings {
    pub iep_header_pattern: String,
    pub taxonomy: CategoryTaxonomy,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            iep_header_pattern: DEFAULT_IEP_HEADER.to_string(),
            taxonomy: CategoryTaxonomy::default(),
        }
    }
}

/// Process-level settings for the batch runner binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub input_directory: String,
    pub test_run: bool,
    pub intake: IntakeSettings,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_default(),
            input_directory: std::env::var("INPUT_DIRECTORY_PATH")
                .unwrap_or_else(|_| "input_pdfs".to_string()),
            test_run: std::env::var("TEST_RUN")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            intake: IntakeSettings {
                iep_header_pattern: std::env::var("IEP_HEADER_PATTERN")
                    .unwrap_or_else(|_| DEFAULT_IEP_HEADER.to_string()),
                taxonomy: CategoryTaxonomy {
                    iep_at_a_glance: std::env::var("IEP_AT_A_GLANCE_DOCUMENT_CODE")
                        .unwrap_or_else(|_| "11".to_string()),
                    reclassification: std::env::var("RECLASSIFICATION_DOCUMENT_CODE")
                        .unwrap_or_else(|_| "12".to_string()),
                    general: std::env::var("GENERAL_DOCUMENT_CODE")
                        .unwrap_or_else(|_| "99".to_string()),
                },
            },
        }
    }
}
