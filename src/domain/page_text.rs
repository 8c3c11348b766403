/// Text extracted from a single source page. Immutable once extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// 0-based page index within the source PDF.
    pub index: usize,
    pub raw: String,
    pub normalized: String,
}

impl PageText {
    pub fn new(index: usize, raw: String, normalized: String) -> Self {
        Self {
            index,
            raw,
            normalized,
        }
    }
}
