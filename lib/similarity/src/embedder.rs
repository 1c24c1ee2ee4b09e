//! Embedding seam
//!
//! [`Embedder`] is the boundary to whatever model turns text into vectors.
//! [`HashingEmbedder`] is a dependency-free implementation that hashes
//! character trigrams and words into a fixed number of buckets; it keeps the
//! service usable offline and makes ranking deterministic in tests.

use ragshelf_core::{Error, Result, Vector};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default dimension for hashed embeddings
pub const DEFAULT_HASHING_DIM: usize = 384;

/// Maps strings to fixed-dimension vectors, one per input, in input order
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>>;
}

/// Feature-hashing embedder over character trigrams and words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEmbedder {
    dim: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dim: DEFAULT_HASHING_DIM,
        }
    }
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig(
                "embedding dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Embed a single text. Text without any characters maps to the zero
    /// vector.
    pub fn embed_one(&self, text: &str) -> Vector {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in trigrams(&normalized) {
            vector[self.bucket(&trigram)] += 1.0;
        }

        // whole words weigh more than their trigrams
        for word in normalized.split_whitespace() {
            vector[self.bucket(word)] += 2.0;
        }

        let mut vector = Vector::new(vector);
        vector.normalize();
        vector
    }

    fn bucket<T: Hash + ?Sized>(&self, value: &T) -> usize {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Character trigrams of a space-padded string
fn trigrams(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    let padded: Vec<char> = format!("  {}  ", s).chars().collect();
    padded
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
