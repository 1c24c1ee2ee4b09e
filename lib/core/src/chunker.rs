//! Fixed-size text chunking.
//!
//! Chunks are contiguous, non-overlapping and in order, so joining them
//! gives back the input exactly. Lengths are counted in characters and a
//! chunk boundary never falls inside a character.

/// Default maximum chunk length, in characters
pub const DEFAULT_MAX_CHUNK_LEN: usize = 512;

/// Splits text into slices of at most `max_len` characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    max_len: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_LEN)
    }
}

impl Chunker {
    /// A `max_len` of zero is treated as one
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Borrowing variant of [`Chunker::chunk`]
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut chunks = Vec::with_capacity(text.len() / self.max_len + 1);
        let mut start = 0;
        let mut count = 0;

        for (idx, _) in text.char_indices() {
            if count == self.max_len {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }
        if start < text.len() {
            chunks.push(&text[start..]);
        }

        chunks
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.split(text).into_iter().map(str::to_string).collect()
    }
}

/// Chunk `text` with the default maximum length
pub fn chunk_text(text: &str) -> Vec<String> {
    Chunker::default().chunk(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello"), vec!["hello".to_string()]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(chunk_text("").is_empty());
    }

    #[test]
    fn test_exact_multiple() {
        let chunker = Chunker::new(3);
        assert_eq!(chunker.split("abcdef"), vec!["abc", "def"]);
        assert_eq!(chunker.split("abcdefg"), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_default_boundary() {
        let text = "x".repeat(DEFAULT_MAX_CHUNK_LEN + 1);
        let chunks = chunk_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), DEFAULT_MAX_CHUNK_LEN);
        assert_eq!(chunks[1], "x");
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let chunker = Chunker::new(2);
        assert_eq!(chunker.split("héllo✓"), vec!["hé", "ll", "o✓"]);
    }

    #[test]
    fn test_zero_max_len_is_one() {
        let chunker = Chunker::new(0);
        assert_eq!(chunker.max_len(), 1);
        assert_eq!(chunker.split("ab"), vec!["a", "b"]);
    }

    proptest! {
        #[test]
        fn chunks_partition_the_text(text in ".{0,600}", max_len in 1usize..80) {
            let chunks = Chunker::new(max_len).chunk(&text);
            prop_assert_eq!(chunks.concat(), text);
            for chunk in &chunks {
                let len = chunk.chars().count();
                prop_assert!(len >= 1 && len <= max_len);
            }
        }

        #[test]
        fn chunking_is_deterministic(text in ".{0,300}") {
            prop_assert_eq!(chunk_text(&text), chunk_text(&text));
        }
    }
}
