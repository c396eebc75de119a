use crate::chunk::Chunk;

/// Fixed-window chunking parameters. Sizes are in characters, not bytes,
/// so Farsi text never gets cut inside a UTF-8 sequence.
#[derive(Debug, Clone, Copy)]
pub struct ChunkerConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            overlap: 500,
        }
    }
}

/// Split `text` into overlapping windows of `chunk_size` characters.
///
/// Chunk `i` starts at character `i * (chunk_size - overlap)`; windows are
/// emitted while the start offset is inside the text, so the last chunk may
/// be shorter than `chunk_size`. Consecutive chunks repeat `overlap`
/// characters of context.
///
/// Panics if `chunk_size <= overlap`.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    assert!(chunk_size > overlap, "chunk_size must exceed overlap");

    let chars: Vec<char> = text.chars().collect();
    let stride = chunk_size - overlap;

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(Chunk::new(index, chars[start..end].iter().collect()));
        start += stride;
        index += 1;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_boundaries() {
        // 25000 chars, chunk_size 10000, overlap 500 -> starts at 0, 9500, 19000.
        let text = "a".repeat(25_000);
        let chunks = split(&text, 10_000, 500);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.len(), 10_000);
        assert_eq!(chunks[1].text.len(), 10_000);
        assert_eq!(chunks[2].text.len(), 6_000);
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let text: String = (0..50).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split(&text, 20, 5);

        let tail: String = chunks[0].text.chars().skip(15).collect();
        let head: String = chunks[1].text.chars().take(5).collect();
        assert_eq!(tail, head);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split("", 100, 10).is_empty());
    }

    #[test]
    fn short_text_yields_single_chunk() {
        let chunks = split("سلام دنیا", 100, 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "سلام دنیا");
    }

    #[test]
    fn zero_overlap_tiles_exactly() {
        let text = "x".repeat(30);
        let chunks = split(&text, 10, 0);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.text.len() == 10));
    }

    #[test]
    fn farsi_text_splits_on_char_boundaries() {
        let text = "تاریخ".repeat(100); // 500 chars, multi-byte each
        let chunks = split(&text, 200, 50);
        let total: usize = chunks[0].text.chars().count();
        assert_eq!(total, 200);
    }

    #[test]
    #[should_panic]
    fn overlap_must_be_smaller_than_chunk_size() {
        split("abc", 10, 10);
    }
}
