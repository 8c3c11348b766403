pub mod observability;
pub mod pdf;
pub mod persistence;
pub mod text_processing;
