mod pdf_splitter;
mod sis_client;

pub use pdf_splitter::{PdfSplitter, PdfSplitterError};
pub use sis_client::{SequenceTable, SisClient, SisError};
