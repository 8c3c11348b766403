mod text_normalizer;

pub use text_normalizer::normalize_extracted_text;
