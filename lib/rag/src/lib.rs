//! # ragshelf RAG
//!
//! The question-answering pipeline:
//!
//! ```text
//! queries ──> RetrievalAssembler ──> SimilarityRanker ──> ResponseSynthesizer ──> answers
//!             (criteria, filter,     (embed pool once,    (query + top chunk
//!              merge, chunk)          top-N per query)      -> Generator)
//! ```
//!
//! Every collaborator (document store, embedder, generator, parser) is passed
//! in through [`PipelineBuilder`]; nothing is global.
//!
//! ## Example
//!
//! ```rust
//! use ragshelf_core::{Document, Query, Result};
//! use ragshelf_rag::{Generator, RagPipeline};
//! use ragshelf_similarity::HashingEmbedder;
//! use ragshelf_storage::InMemoryCatalog;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Canned;
//! impl Generator for Canned {
//!     fn generate(&self, _prompt: &str) -> Result<String> {
//!         Ok("Try the Gentle Cream.".to_string())
//!     }
//! }
//!
//! let catalog = InMemoryCatalog::new();
//! catalog.insert(Document::from_value(json!({
//!     "type": "product",
//!     "product_name": "Gentle Cream",
//!     "description": "Contains aloe vera and is affordable"
//! })).unwrap());
//!
//! let pipeline = RagPipeline::builder(
//!     Arc::new(catalog),
//!     Arc::new(HashingEmbedder::default()),
//!     Arc::new(Canned),
//! )
//! .build()
//! .unwrap();
//!
//! let answers = pipeline.answer_batch(&[Query::from("affordable cream with aloe vera")]).unwrap();
//! assert_eq!(answers, vec!["Try the Gentle Cream.".to_string()]);
//! ```

pub mod assembler;
pub mod pipeline;
pub mod synthesizer;

pub use assembler::RetrievalAssembler;
pub use pipeline::{
    BatchOutcome, PipelineBuilder, PipelineConfig, RagPipeline, Retrieval, NO_RESULTS_MESSAGE,
};
pub use synthesizer::{build_prompt, Generator, ResponseSynthesizer};
