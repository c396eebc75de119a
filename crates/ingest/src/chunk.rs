/// One fixed-size window of the source text.
///
/// Chunks are derived, never persisted: the same `(text, chunk_size, overlap)`
/// always regenerates the same sequence, so `index` is the stable key the
/// progress store uses across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }
}
