pub mod chunk;
pub mod chunker;
pub mod reader;

pub use chunk::Chunk;
pub use chunker::{split, ChunkerConfig};
pub use reader::{read_book, read_book_chunks, InputError};
