mod batch_result;
mod boundary;
mod category;
mod document_row;
mod page_text;
mod segment;
mod segment_state;

pub use batch_result::{BatchResult, BatchStatus, DocumentInfo, UploadError};
pub use boundary::DocumentBoundary;
pub use category::{CategoryTaxonomy, DocumentFamily, DocumentTypeLabel};
pub use document_row::{ArchivedDocumentRow, MAX_DISPLAY_NAME_LEN};
pub use page_text::PageText;
pub use segment::{Segment, COMBINED_PACKAGE_LABEL};
pub use segment_state::SegmentState;
