//! # ragshelf Similarity
//!
//! Embedding and ranking for the retrieval pipeline.
//!
//! The chunk pool of a batch and the batch's query texts are embedded once;
//! each query then keeps the top-N chunks of the shared pool by cosine
//! similarity.
//!
//! ## Example
//!
//! ```rust
//! use ragshelf_similarity::{HashingEmbedder, SimilarityRanker};
//! use std::sync::Arc;
//!
//! let ranker = SimilarityRanker::new(Arc::new(HashingEmbedder::default())).with_top_n(1);
//! let chunks = vec![
//!     "Product Name: Gentle Cream\nDescription: aloe vera\n".to_string(),
//!     "Product Name: Night Serum\nDescription: retinol\n".to_string(),
//! ];
//! let queries = vec!["aloe vera cream".to_string()];
//! let ranked = ranker.rank(&chunks, &queries).unwrap();
//! assert_eq!(ranked[0].indices(), vec![0]);
//! ```

pub mod embedder;
pub mod rank;

pub use embedder::{Embedder, HashingEmbedder, DEFAULT_HASHING_DIM};
pub use rank::{top_n, RankedResult, ScoredChunk, SimilarityRanker, DEFAULT_TOP_N};
