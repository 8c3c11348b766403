mod lopdf_splitter;
mod mock_pdf_splitter;

pub use lopdf_splitter::LopdfSplitter;
pub use mock_pdf_splitter::MockPdfSplitter;
